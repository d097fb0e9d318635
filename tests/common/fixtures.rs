use records2csv::CsvRecord;
use serde::{Deserialize, Serialize};

/// The same four fields declared three times with different metadata.
pub trait UserLike: Sized {
    fn build(user: &str, email: &str, user_id: u64, phone: &str) -> Self;
}

macro_rules! user_fixture {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub user: String,
            pub email: String,
            pub user_id: u64,
            pub phone: String,
        }

        impl UserLike for $name {
            fn build(user: &str, email: &str, user_id: u64, phone: &str) -> Self {
                $name {
                    user: user.to_string(),
                    email: email.to_string(),
                    user_id,
                    phone: phone.to_string(),
                }
            }
        }
    };
}

user_fixture!(PlainUser);
user_fixture!(AnnotatedUser);
user_fixture!(RenamedUser);

impl CsvRecord for PlainUser {}

impl CsvRecord for AnnotatedUser {
    fn display_name(field: &str) -> Option<&'static str> {
        match field {
            "user" => Some("User"),
            "email" => Some("Email"),
            "phone" => Some("Phone"),
            _ => None,
        }
    }

    fn is_ignored(field: &str) -> bool {
        field == "userId"
    }
}

impl CsvRecord for RenamedUser {
    fn display_name(field: &str) -> Option<&'static str> {
        match field {
            "user" => Some("User"),
            "email" => Some("Email"),
            "userId" => Some("UserId"),
            _ => None,
        }
    }

    fn is_ignored(field: &str) -> bool {
        field == "phone"
    }
}

pub fn two_users<T: UserLike>() -> Vec<T> {
    vec![
        T::build("testuser", "test@test.org", 1, "12345"),
        T::build("test, \"user\"", "another@test.org", 2, "12345"),
    ]
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
