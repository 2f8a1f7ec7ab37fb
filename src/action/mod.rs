//! Action module
//!
//! An action is a GraphQL mutation whose resolver is an HTTP handler. Each
//! action declares its argument and result records; the registry mounts
//! them under `<path_prefix>/<ActionName>` and erases their types so the
//! request handler can dispatch by path.

mod insert_user;
mod payload;
mod registry;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::PayloadMode;
use crate::error::ActionError;

pub use insert_user::{InsertUserAction, InsertUserActionArgs, TokenOutput, UserInfo};
pub use registry::ActionRegistry;

/// Business logic behind one action
pub trait Action: Send + Sync + 'static {
    /// Action name as declared on the `Mutation` type
    const NAME: &'static str;

    type Args: DeserializeOwned;
    type Output: Serialize;

    fn execute(&self, args: Self::Args) -> Result<Self::Output, ActionError>;
}

/// Type-erased action: raw body in, encoded JSON out
pub trait ActionHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Decode the body, run the action and encode its result
    fn call(&self, body: &[u8], mode: PayloadMode) -> Result<Vec<u8>, ActionError>;
}

impl<A: Action> ActionHandler for A {
    fn name(&self) -> &'static str {
        A::NAME
    }

    fn call(&self, body: &[u8], mode: PayloadMode) -> Result<Vec<u8>, ActionError> {
        let args: A::Args = payload::decode_args(body, mode)?;
        let output = self.execute(args)?;
        payload::encode_output(&output)
    }
}

/// Registry holding every action this server exposes
pub fn default_registry(path_prefix: &str) -> ActionRegistry {
    let mut registry = ActionRegistry::new(path_prefix);
    registry.register(InsertUserAction);
    registry
}
