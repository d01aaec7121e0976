pub mod panel;
pub mod session;
pub mod standalone;

pub use panel::PanelForm;
pub use session::{FormError, FormSession, FormState, SuccessListener, SAVE_FAILED_MESSAGE};
pub use standalone::StandaloneForm;
