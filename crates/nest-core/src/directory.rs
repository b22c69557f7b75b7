//! User directory with change notifications
//!
//! Writes to user records go through `UserDirectory`, which diffs the category
//! against its previous value and hands a `UserUpdate` to every registered
//! `UserHook`, in registration order.

use tracing::debug;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{normalize_category, User, UserUpdate};

/// Callback invoked after a user record changes
pub trait UserHook: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// React to an update. Errors abort dispatch and reach the caller.
    fn on_user_updated(&self, update: &UserUpdate) -> Result<()>;
}

/// Owns user writes and dispatches change events to hooks
pub struct UserDirectory {
    db: Database,
    hooks: Vec<Box<dyn UserHook>>,
}

impl UserDirectory {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            hooks: Vec::new(),
        }
    }

    /// Register a hook; hooks run in the order they were added
    pub fn register(&mut self, hook: Box<dyn UserHook>) {
        debug!("Registered user hook: {}", hook.name());
        self.hooks.push(hook);
    }

    /// Builder-style `register`
    pub fn with_hook(mut self, hook: Box<dyn UserHook>) -> Self {
        self.register(hook);
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Create a user; a non-empty category is announced as a change
    pub fn create_user(&self, name: &str, category: Option<&str>) -> Result<User> {
        let category = normalize_category(category);
        let id = self.db.create_user(name, category.as_deref())?;
        let user = self.load(id)?;

        let update = UserUpdate::from_change(None, user.clone());
        self.dispatch(&update)?;
        Ok(user)
    }

    /// Set a user's category and notify hooks with the diff
    ///
    /// A blank category clears it.
    pub fn set_category(&self, user_id: i64, category: Option<&str>) -> Result<UserUpdate> {
        let category = normalize_category(category);
        let previous = self
            .db
            .update_user_category(user_id, category.as_deref())?;
        let user = self.load(user_id)?;

        let update = UserUpdate::from_change(previous.as_deref(), user);
        self.dispatch(&update)?;
        Ok(update)
    }

    fn load(&self, id: i64) -> Result<User> {
        self.db
            .get_user(id)?
            .ok_or_else(|| Error::NotFound(format!("user {}", id)))
    }

    fn dispatch(&self, update: &UserUpdate) -> Result<()> {
        for hook in &self.hooks {
            debug!(
                user_id = update.user.id,
                category_changed = update.category_changed,
                "Dispatching to {}",
                hook.name()
            );
            hook.on_user_updated(update)?;
        }
        Ok(())
    }
}
