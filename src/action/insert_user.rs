// InsertUserAction: argument/result records and the business logic stub
//
// Schema:
//   type Mutation { InsertUserAction(user_info: UserInfo): TokenOutput }
//   input UserInfo { username: String! password: String! }
//   type TokenOutput { accessToken: String! }

use serde::{Deserialize, Serialize};

use super::Action;
use crate::error::ActionError;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenOutput {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertUserActionArgs {
    /// Nullable in the schema; `null` and absent both decode to `None`
    pub user_info: Option<UserInfo>,
}

pub struct InsertUserAction;

impl Action for InsertUserAction {
    const NAME: &'static str = "InsertUserAction";
    type Args = InsertUserActionArgs;
    type Output = TokenOutput;

    fn execute(&self, args: InsertUserActionArgs) -> Result<TokenOutput, ActionError> {
        Ok(insert_user_action(args))
    }
}

/// Takes the action arguments and returns the action's response type.
///
/// Not implemented yet: always answers with an empty token.
pub fn insert_user_action(_args: InsertUserActionArgs) -> TokenOutput {
    TokenOutput::default()
}
