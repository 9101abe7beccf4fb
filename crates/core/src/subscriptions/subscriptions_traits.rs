use super::subscriptions_model::Subscription;
use crate::errors::Result;

/// Read access to stored subscriptions.
///
/// Implemented by the persistence layer; the engine never writes.
pub trait SubscriptionRepositoryTrait: Send + Sync {
    /// All subscriptions owned by `user_id`, in any order.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Subscription>>;

    /// Like [`Self::list_for_user`], but fails on the first record that breaks
    /// [`Subscription::validate`].
    fn list_valid_for_user(&self, user_id: &str) -> Result<Vec<Subscription>> {
        let subscriptions = self.list_for_user(user_id)?;
        for subscription in &subscriptions {
            subscription.validate()?;
        }
        Ok(subscriptions)
    }
}
