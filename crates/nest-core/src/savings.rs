//! Savings target rule
//!
//! Reacts to user category changes: when a user moves into a category with a
//! configured monthly savings amount, the user gets a savings target for the
//! currently active quarter carrying that amount.
//!
//! # Architecture
//!
//! - `CategoryAmounts` resolves category -> monthly amount (see `config`)
//! - `QuarterRegistry` answers which quarter is active
//! - `SavingsTargetStore` upserts the (user, quarter) record
//! - `SavingsTargetRule` ties them together and is registered as a
//!   `UserHook` on the `UserDirectory`
//!
//! Missing amounts and missing quarters are normal no-op outcomes. Store
//! failures propagate unchanged to whoever dispatched the event.

use tracing::{debug, info};

use crate::config::CategoryAmounts;
use crate::db::Database;
use crate::directory::UserHook;
use crate::error::Result;
use crate::models::{Quarter, SavingsTarget, User, UserUpdate};

/// Actor recorded in the audit log for rule-driven writes
pub const RULE_ACTOR: &str = "savings_target_rule";

/// Source of the single active quarter
pub trait QuarterRegistry: Send + Sync {
    /// The active quarter, or `None` if no quarter is active
    fn current_active_quarter(&self) -> Result<Option<Quarter>>;
}

/// Persistence for savings targets keyed by (user, quarter)
pub trait SavingsTargetStore: Send + Sync {
    /// Create the record or overwrite its amount
    fn upsert(&self, user_id: i64, quarter_id: i64, monthly_target: f64)
        -> Result<SavingsTarget>;
}

impl QuarterRegistry for Database {
    fn current_active_quarter(&self) -> Result<Option<Quarter>> {
        self.get_active_quarter()
    }
}

impl SavingsTargetStore for Database {
    fn upsert(
        &self,
        user_id: i64,
        quarter_id: i64,
        monthly_target: f64,
    ) -> Result<SavingsTarget> {
        self.upsert_savings_target_audited(RULE_ACTOR, user_id, quarter_id, monthly_target)
    }
}

/// What the rule did for one event
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// Category did not change or is empty
    Unchanged,
    /// Category has no amount (or zero) configured
    NoConfiguredAmount { category: String },
    /// Nothing to attach the target to
    NoActiveQuarter,
    /// Target written
    Upserted(SavingsTarget),
}

impl RuleOutcome {
    pub fn is_upserted(&self) -> bool {
        matches!(self, Self::Upserted(_))
    }
}

/// Keeps each user's active-quarter savings target in line with their category
pub struct SavingsTargetRule<C, Q, S> {
    categories: C,
    quarters: Q,
    store: S,
}

impl<C, Q, S> SavingsTargetRule<C, Q, S>
where
    C: CategoryAmounts,
    Q: QuarterRegistry,
    S: SavingsTargetStore,
{
    pub fn new(categories: C, quarters: Q, store: S) -> Self {
        Self {
            categories,
            quarters,
            store,
        }
    }

    /// Apply the rule to one user-update event
    ///
    /// Performs at most one upsert. Collaborators are only consulted once the
    /// previous step succeeded.
    pub fn on_user_updated(&self, update: &UserUpdate) -> Result<RuleOutcome> {
        let Some(category) = update.changed_category() else {
            return Ok(RuleOutcome::Unchanged);
        };

        let amount = match self.categories.monthly_savings_for(category) {
            Some(amount) if amount > 0.0 => amount,
            _ => {
                debug!(
                    user_id = update.user.id,
                    category, "No savings amount configured, skipping"
                );
                return Ok(RuleOutcome::NoConfiguredAmount {
                    category: category.to_string(),
                });
            }
        };

        let Some(quarter) = self.quarters.current_active_quarter()? else {
            debug!(user_id = update.user.id, "No active quarter, skipping");
            return Ok(RuleOutcome::NoActiveQuarter);
        };

        let target = self.store.upsert(update.user.id, quarter.id, amount)?;
        info!(
            user_id = update.user.id,
            quarter = %quarter.label,
            monthly_target = amount,
            "Savings target set"
        );

        Ok(RuleOutcome::Upserted(target))
    }

    /// Replay the rule for existing users as if their category just changed
    ///
    /// Used after a new quarter is activated. Stops at the first error.
    pub fn resync<'a, I>(&self, users: I) -> Result<Vec<RuleOutcome>>
    where
        I: IntoIterator<Item = &'a User>,
    {
        users
            .into_iter()
            .map(|user| {
                let update = UserUpdate::from_change(None, user.clone());
                self.on_user_updated(&update)
            })
            .collect()
    }
}

impl<C, Q, S> UserHook for SavingsTargetRule<C, Q, S>
where
    C: CategoryAmounts,
    Q: QuarterRegistry,
    S: SavingsTargetStore,
{
    fn name(&self) -> &str {
        "savings_target_rule"
    }

    fn on_user_updated(&self, update: &UserUpdate) -> Result<()> {
        SavingsTargetRule::on_user_updated(self, update).map(|_| ())
    }
}
