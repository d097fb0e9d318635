/// This module provides the quoted CSV converter and its streaming writer.
pub mod csv;
