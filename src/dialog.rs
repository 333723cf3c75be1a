use crate::backend::Backend;
use crate::error::BackendError;
use crate::manager::InventoryManager;

/// Transient state for the "add new item" dialog: a visibility flag and
/// the pending text field value. Decoupled from the inventory manager;
/// the two meet only in [`submit`](Self::submit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddItemDialog {
    visible: bool,
    input: String,
}

impl AddItemDialog {
    /// Create a closed dialog with an empty text field
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the dialog is currently shown
    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Show the dialog
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Hide the dialog. Pending text survives; it is cleared only by a
    /// successful submit.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Current text field contents
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Mirror the text field contents
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Submit the pending text: trim it, add the item, clear the field
    /// and close. Empty or whitespace-only text is a no-op and the dialog
    /// stays open. A backend error propagates and leaves the dialog open
    /// with its text intact.
    pub async fn submit<B: Backend>(
        &mut self,
        manager: &mut InventoryManager<B>,
    ) -> Result<(), BackendError> {
        let name = self.input.trim().to_string();
        if name.is_empty() {
            return Ok(());
        }

        manager.add_item(&name).await?;
        self.input.clear();
        self.close();
        Ok(())
    }
}
