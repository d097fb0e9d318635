use std::slice::Iter;

/// Per-type metadata provider.
///
/// Serde already tells the converter which fields a record has and in which
/// order; this trait lets a record type attach CSV-specific metadata to those
/// fields without touching its serde attributes. Both methods receive the
/// intrinsic (serde) name of the field.
///
/// Names are matched verbatim, after any `#[serde(rename)]` or `rename_all`.
/// Metadata for a name the record does not serialize is never consulted, so
/// a misspelt name (`"userID"` for `"userId"`) leaves the real field in the
/// output under its intrinsic name.
///
/// A type without any metadata simply opts in with an empty impl:
///
/// ```
/// use records2csv::core::field::CsvRecord;
///
/// #[derive(serde::Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl CsvRecord for Point {}
/// ```
///
/// Renaming and ignoring fields:
///
/// ```
/// use records2csv::core::field::CsvRecord;
///
/// #[derive(serde::Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct User {
///     user: String,
///     email: String,
///     user_id: u64,
/// }
///
/// impl CsvRecord for User {
///     fn display_name(field: &str) -> Option<&'static str> {
///         match field {
///             "user" => Some("User"),
///             _ => None,
///         }
///     }
///
///     fn is_ignored(field: &str) -> bool {
///         field == "userId"
///     }
/// }
/// ```
pub trait CsvRecord {
    /// Header label replacing the intrinsic name of `field`.
    fn display_name(_field: &str) -> Option<&'static str> {
        None
    }

    /// Whether `field` is left out of the header and of every row.
    fn is_ignored(_field: &str) -> bool {
        false
    }
}

impl<T: CsvRecord + ?Sized> CsvRecord for &T {
    fn display_name(field: &str) -> Option<&'static str> {
        T::display_name(field)
    }

    fn is_ignored(field: &str) -> bool {
        T::is_ignored(field)
    }
}

/// Resolved metadata of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    intrinsic_name: &'static str,
    display_name: Option<&'static str>,
    ignore: bool,
    order: usize,
}

impl FieldDescriptor {
    /// Descriptor for a field without any metadata.
    pub fn new(intrinsic_name: &'static str, order: usize) -> Self {
        FieldDescriptor {
            intrinsic_name,
            display_name: None,
            ignore: false,
            order,
        }
    }

    /// Descriptor for the field at `order`, metadata taken from `R`.
    pub fn resolve<R: CsvRecord + ?Sized>(intrinsic_name: &'static str, order: usize) -> Self {
        let descriptor = FieldDescriptor::new(intrinsic_name, order);

        if R::is_ignored(intrinsic_name) {
            return descriptor.ignored();
        }

        match R::display_name(intrinsic_name) {
            Some(name) => descriptor.renamed(name),
            None => descriptor,
        }
    }

    pub fn renamed(mut self, display_name: &'static str) -> Self {
        self.display_name = Some(display_name);
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self.display_name = None;
        self
    }

    pub fn intrinsic_name(&self) -> &'static str {
        self.intrinsic_name
    }

    pub fn display_name(&self) -> Option<&'static str> {
        self.display_name
    }

    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Text written in the header for this field.
    pub fn label(&self) -> &'static str {
        self.display_name.unwrap_or(self.intrinsic_name)
    }
}

/// Ordered field descriptors of one record type.
///
/// A layout is derived once per conversion and shared, read-only, by the
/// header and every row so that columns stay aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordLayout {
    descriptors: Vec<FieldDescriptor>,
}

impl RecordLayout {
    pub fn new(descriptors: Vec<FieldDescriptor>) -> Self {
        RecordLayout { descriptors }
    }

    /// Layout of `R` built from field names in declaration order.
    pub fn from_names<R, I>(names: I) -> Self
    where
        R: CsvRecord + ?Sized,
        I: IntoIterator<Item = &'static str>,
    {
        let descriptors = names
            .into_iter()
            .enumerate()
            .map(|(order, name)| FieldDescriptor::resolve::<R>(name, order))
            .collect();

        RecordLayout { descriptors }
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// Descriptors that produce a column.
    pub fn columns(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.descriptors.iter().filter(|d| !d.is_ignored())
    }

    pub fn column_count(&self) -> usize {
        self.columns().count()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordLayout {
    type Item = &'a FieldDescriptor;
    type IntoIter = Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
