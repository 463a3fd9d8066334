use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// `{"message": ...}` body used for every non-contact reply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

pub(crate) type MessageReply = (StatusCode, Json<MessageBody>);

pub(crate) fn reply(status: StatusCode, message: impl ToString) -> MessageReply {
    (
        status,
        Json(MessageBody {
            message: message.to_string(),
        }),
    )
}
