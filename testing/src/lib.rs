//! # tasksync testing
//!
//! Testing utilities for reducers built on `tasksync-core`.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then builder for a single reducer step
//! - [`assertions`]: Helpers for inspecting returned effects
//! - [`resolve_effects`]: Drives effect futures to the actions they produce,
//!   without a store
//!
//! ## Example
//!
//! ```ignore
//! use tasksync_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(fake_environment())
//!     .given_state(TodoState::new())
//!     .when_action(TodoAction::Refresh)
//!     .then_state(|state| assert!(state.is_loading))
//!     .then_effects(assertions::assert_has_future_effect)
//!     .then_outcomes(|actions| assert_eq!(actions.len(), 1))
//!     .run();
//! ```

mod reducer_test;

pub use reducer_test::{assertions, ReducerTest};

use tasksync_core::effect::Effect;

/// Run every effect to completion and collect the actions they produce
///
/// Futures run one after another in the order given. Effects that resolve to
/// `None` contribute nothing.
pub async fn resolve_effects<A, I>(effects: I) -> Vec<A>
where
    I: IntoIterator<Item = Effect<A>>,
{
    let mut actions = Vec::new();
    for effect in effects {
        match effect {
            Effect::None => {},
            Effect::Future(fut) => {
                if let Some(action) = fut.await {
                    actions.push(action);
                }
            },
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_effects_keeps_order_and_skips_none() {
        let effects = vec![
            Effect::future(async { Some(1) }),
            Effect::None,
            Effect::future(async { Some(2) }),
            Effect::future(async { None }),
            Effect::future(async { Some(3) }),
            Effect::future(async { Some(4) }),
        ];

        assert_eq!(resolve_effects(effects).await, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_resolve_effects_empty() {
        let actions: Vec<u8> = resolve_effects(Vec::new()).await;
        assert!(actions.is_empty());
    }
}
