// Rust guideline compliant 2026-02-06

//! Reversible credential commands and the undo/redo log.
//!
//! The log follows a linear undo model: recording a new command discards the
//! redo history. A command is always held by exactly one of the two stacks.

use tracing::debug;

/// A single reversible change to the credential set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A credential was added for a service that had none.
    AddCredential {
        /// Service identifier.
        service: String,
        /// Secret that was stored.
        secret: String,
    },
    /// An existing credential was overwritten.
    UpdateCredential {
        /// Service identifier.
        service: String,
        /// Secret before the update.
        old_secret: String,
        /// Secret after the update.
        new_secret: String,
    },
}

/// Data-level effect of applying a command in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation<'a> {
    /// Insert or overwrite the secret for a service.
    Put {
        /// Service identifier.
        service: &'a str,
        /// Secret to store.
        secret: &'a str,
    },
    /// Delete the credential for a service.
    Remove {
        /// Service identifier.
        service: &'a str,
    },
}

impl Command {
    /// Builds the command for writing `secret` given the service's prior secret.
    pub fn for_write(service: &str, previous: Option<&str>, secret: &str) -> Self {
        match previous {
            None => Command::AddCredential {
                service: service.to_string(),
                secret: secret.to_string(),
            },
            Some(old) => Command::UpdateCredential {
                service: service.to_string(),
                old_secret: old.to_string(),
                new_secret: secret.to_string(),
            },
        }
    }

    /// Returns the service this command touches.
    pub fn service(&self) -> &str {
        match self {
            Command::AddCredential { service, .. } | Command::UpdateCredential { service, .. } => {
                service
            }
        }
    }

    /// Returns a short, secret-free name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::AddCredential { .. } => "add_credential",
            Command::UpdateCredential { .. } => "update_credential",
        }
    }

    /// Returns the effect that (re)applies this command.
    pub fn forward(&self) -> Mutation<'_> {
        match self {
            Command::AddCredential { service, secret } => Mutation::Put {
                service: service.as_str(),
                secret: secret.as_str(),
            },
            Command::UpdateCredential {
                service,
                new_secret,
                ..
            } => Mutation::Put {
                service: service.as_str(),
                secret: new_secret.as_str(),
            },
        }
    }

    /// Returns the effect that reverts this command.
    pub fn backward(&self) -> Mutation<'_> {
        match self {
            Command::AddCredential { service, .. } => Mutation::Remove {
                service: service.as_str(),
            },
            Command::UpdateCredential {
                service,
                old_secret,
                ..
            } => Mutation::Put {
                service: service.as_str(),
                secret: old_secret.as_str(),
            },
        }
    }
}

struct StackNode {
    command: Command,
    next: Option<Box<StackNode>>,
}

/// LIFO stack of commands built from singly linked nodes.
#[derive(Default)]
pub struct CommandStack {
    top: Option<Box<StackNode>>,
    len: usize,
}

impl CommandStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a command on top of the stack.
    pub fn push(&mut self, command: Command) {
        let next = self.top.take();
        self.top = Some(Box::new(StackNode { command, next }));
        self.len += 1;
    }

    /// Removes and returns the top command.
    pub fn pop(&mut self) -> Option<Command> {
        let node = self.top.take()?;
        let StackNode { command, next } = *node;
        self.top = next;
        self.len -= 1;
        Some(command)
    }

    /// Returns the top command without removing it.
    pub fn peek(&self) -> Option<&Command> {
        self.top.as_deref().map(|node| &node.command)
    }

    /// Returns true if the stack holds no commands.
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Returns the number of commands on the stack.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes every command.
    pub fn clear(&mut self) {
        // Unlink node by node so long histories do not recurse on drop.
        let mut link = self.top.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }
}

impl Drop for CommandStack {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for CommandStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandStack").field("len", &self.len).finish()
    }
}

/// Undo and redo history of reversible commands.
#[derive(Debug, Default)]
pub struct CommandLog {
    undo: CommandStack,
    redo: CommandStack,
}

impl CommandLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly executed command and discards the redo history.
    pub fn record(&mut self, command: Command) {
        debug!(kind = command.kind(), service = command.service(), "recorded command");
        self.undo.push(command);
        self.redo.clear();
    }

    /// Reverts the most recent command.
    ///
    /// `apply` receives the command and must perform its backward effect.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if there is nothing to undo, `Ok(true)` once the command has
    /// been reverted and moved to the redo stack.
    ///
    /// # Errors
    ///
    /// Returns the error from `apply`; the command stays on the undo stack.
    pub fn undo<F, E>(&mut self, apply: F) -> Result<bool, E>
    where
        F: FnOnce(&Command) -> Result<(), E>,
    {
        Self::transfer(&mut self.undo, &mut self.redo, apply, "undo")
    }

    /// Re-applies the most recently undone command.
    ///
    /// `apply` receives the command and must perform its forward effect.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if there is nothing to redo, `Ok(true)` once the command has
    /// been re-applied and moved back to the undo stack.
    ///
    /// # Errors
    ///
    /// Returns the error from `apply`; the command stays on the redo stack.
    pub fn redo<F, E>(&mut self, apply: F) -> Result<bool, E>
    where
        F: FnOnce(&Command) -> Result<(), E>,
    {
        Self::transfer(&mut self.redo, &mut self.undo, apply, "redo")
    }

    fn transfer<F, E>(
        from: &mut CommandStack,
        to: &mut CommandStack,
        apply: F,
        action: &'static str,
    ) -> Result<bool, E>
    where
        F: FnOnce(&Command) -> Result<(), E>,
    {
        let Some(command) = from.pop() else {
            return Ok(false);
        };

        if let Err(err) = apply(&command) {
            from.push(command);
            return Err(err);
        }

        debug!(action, kind = command.kind(), service = command.service(), "moved command");
        to.push(command);
        Ok(true)
    }

    /// Returns true if there is a command to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Returns true if there is a command to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Returns the next command `undo` would revert.
    pub fn peek_undo(&self) -> Option<&Command> {
        self.undo.peek()
    }

    /// Returns the next command `redo` would re-apply.
    pub fn peek_redo(&self) -> Option<&Command> {
        self.redo.peek()
    }

    /// Returns the depth of the undo stack.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Returns the depth of the redo stack.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Discards both histories.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
