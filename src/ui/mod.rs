pub mod dialogs;
pub mod keybindings;
pub mod step_view;
pub mod terminal_guard;

pub use dialogs::HelpDialog;
pub use step_view::{StepView, TuiRenderer};
