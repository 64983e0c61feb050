//! Document assembly, validation and output.

pub mod assembler;
pub mod emitter;
pub mod validator;

pub use assembler::DocumentAssembler;
pub use emitter::{to_json_pretty, write_file, write_to};
pub use validator::{
    DocumentValidator, ValidationError, ValidationErrorKind, ValidationReport, ValidationWarning,
    ValidationWarningKind,
};
