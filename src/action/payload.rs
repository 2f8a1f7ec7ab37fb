// Request/response body codec for actions

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::PayloadMode;
use crate::error::ActionError;

/// Body a GraphQL engine posts to an action handler.
/// Only `input` is read; `action` and `session_variables` are ignored.
#[derive(Deserialize)]
struct HasuraEnvelope<T> {
    input: T,
}

/// Decode the arguments from the first JSON value of `body`.
/// Anything after that value is left unread.
pub fn decode_args<T: DeserializeOwned>(body: &[u8], mode: PayloadMode) -> Result<T, ActionError> {
    match mode {
        PayloadMode::Raw => first_value(body),
        PayloadMode::Hasura => first_value::<HasuraEnvelope<T>>(body).map(|envelope| envelope.input),
    }
}

fn first_value<T: DeserializeOwned>(body: &[u8]) -> Result<T, ActionError> {
    match serde_json::Deserializer::from_slice(body).into_iter::<T>().next() {
        Some(value) => value.map_err(ActionError::Decode),
        // Empty or whitespace-only body: let serde produce its EOF error
        None => serde_json::from_slice::<T>(body).map_err(ActionError::Decode),
    }
}

pub fn encode_output<T: Serialize>(output: &T) -> Result<Vec<u8>, ActionError> {
    serde_json::to_vec(output).map_err(ActionError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{InsertUserActionArgs, TokenOutput};
    use std::collections::HashMap;

    #[test]
    fn test_decode_raw() {
        let args: InsertUserActionArgs = decode_args(
            br#"{"user_info":{"username":"ann","password":"pw"}}"#,
            PayloadMode::Raw,
        )
        .unwrap();
        assert_eq!(args.user_info.unwrap().username, "ann");
    }

    #[test]
    fn test_decode_hasura_envelope() {
        let body = br#"{
            "action": {"name": "InsertUserAction"},
            "input": {"user_info": {"username": "ann", "password": "pw"}},
            "session_variables": {"x-hasura-role": "admin"}
        }"#;
        let args: InsertUserActionArgs = decode_args(body, PayloadMode::Hasura).unwrap();
        assert_eq!(args.user_info.unwrap().password, "pw");
    }

    #[test]
    fn test_decode_hasura_requires_input() {
        let err = decode_args::<InsertUserActionArgs>(br#"{"action":{}}"#, PayloadMode::Hasura)
            .unwrap_err();
        assert!(err.to_string().contains("input"));
    }

    #[test]
    fn test_decode_failures() {
        let bodies: [&[u8]; 6] = [b"{", b"", b"  \n", b"[1,2]", b"not json", br#"{"user_info":5}"#];
        for body in bodies {
            let result = decode_args::<InsertUserActionArgs>(body, PayloadMode::Raw);
            assert!(matches!(result, Err(ActionError::Decode(_))), "body: {body:?}");
        }
    }

    #[test]
    fn test_decode_reads_first_value_only() {
        let args: InsertUserActionArgs =
            decode_args(br#"{"user_info":{"username":"ann"}} {}"#, PayloadMode::Raw).unwrap();
        assert_eq!(args.user_info.unwrap().username, "ann");

        let args: InsertUserActionArgs =
            decode_args(br#"{"input":{}} trailing"#, PayloadMode::Hasura).unwrap();
        assert_eq!(args, InsertUserActionArgs::default());
    }

    #[test]
    fn test_decode_null_argument() {
        let raw: InsertUserActionArgs =
            decode_args(br#"{"user_info":null}"#, PayloadMode::Raw).unwrap();
        assert!(raw.user_info.is_none());

        let hasura: InsertUserActionArgs =
            decode_args(br#"{"input":{"user_info":null}}"#, PayloadMode::Hasura).unwrap();
        assert!(hasura.user_info.is_none());
    }

    #[test]
    fn test_encode_empty_result() {
        let bytes = encode_output(&TokenOutput::default()).unwrap();
        assert_eq!(bytes, br#"{"accessToken":""}"#);
    }

    #[test]
    fn test_encode_failure() {
        // Non-string map keys cannot be represented in JSON
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(encode_output(&map), Err(ActionError::Encode(_))));
    }
}
