pub mod dates;
pub mod submission;
pub mod validation;

pub use dates::{to_iso_display, to_wire_format};
pub use submission::{confirm_payload, form_payload, load_for_form};
pub use validation::{
    clean_list, validate_confirmed, validate_form, MAX_HCP_NAME_LEN, MAX_NOTE_LEN,
};
