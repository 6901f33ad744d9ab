//! Data adapter commands.

use crate::command::Command;

/// The four commands a data adapter uses to read and write one table.
///
/// The command builder reads the select command to generate the other three.
#[derive(Debug, Clone, Default)]
pub struct DataAdapter {
    select_command: Option<Command>,
    insert_command: Option<Command>,
    update_command: Option<Command>,
    delete_command: Option<Command>,
}

impl DataAdapter {
    /// Create an adapter around a select command.
    #[must_use]
    pub fn new(select_command: Command) -> Self {
        Self {
            select_command: Some(select_command),
            ..Self::default()
        }
    }

    /// The select command.
    #[must_use]
    pub fn select_command(&self) -> Option<&Command> {
        self.select_command.as_ref()
    }

    /// Replace the select command.
    pub fn set_select_command(&mut self, command: Option<Command>) {
        self.select_command = command;
    }

    /// The insert command.
    #[must_use]
    pub fn insert_command(&self) -> Option<&Command> {
        self.insert_command.as_ref()
    }

    /// Replace the insert command.
    pub fn set_insert_command(&mut self, command: Option<Command>) {
        self.insert_command = command;
    }

    /// The update command.
    #[must_use]
    pub fn update_command(&self) -> Option<&Command> {
        self.update_command.as_ref()
    }

    /// Replace the update command.
    pub fn set_update_command(&mut self, command: Option<Command>) {
        self.update_command = command;
    }

    /// The delete command.
    #[must_use]
    pub fn delete_command(&self) -> Option<&Command> {
        self.delete_command.as_ref()
    }

    /// Replace the delete command.
    pub fn set_delete_command(&mut self, command: Option<Command>) {
        self.delete_command = command;
    }
}
