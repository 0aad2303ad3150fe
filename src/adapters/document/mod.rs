//! Document adapters - Rendering the decision record.
//!
//! - `RecordGenerator` - Generates the printable markdown decision record

mod record_generator;

pub use record_generator::RecordGenerator;
