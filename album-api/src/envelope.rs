use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;

/// Raw response envelope as the backend emits it: `{ code, msg, data, total? }`.
///
/// The backend signals business-level failure through `code`, not the HTTP
/// status, so this is decoded from the body regardless of status line.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub total: Option<i64>,
}

/// Successful payload of a listing endpoint: one page plus the
/// server-reported total count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl Envelope {
    fn check_code(&self) -> Result<(), ApiError> {
        match self.code {
            200 => Ok(()),
            401 => Err(ApiError::SessionExpired(
                self.msg
                    .clone()
                    .unwrap_or_else(|| "Session expired, please log in again".to_string()),
            )),
            code => Err(ApiError::Server {
                code,
                msg: self
                    .msg
                    .clone()
                    .unwrap_or_else(|| "Request failed".to_string()),
            }),
        }
    }

    /// Success with no interesting payload (delete, rename, logout).
    pub fn into_ok(self) -> Result<(), ApiError> {
        self.check_code()
    }

    /// Success carrying a `data` payload.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        self.check_code()?;
        let data = self
            .data
            .ok_or_else(|| ApiError::Decode("missing data field".to_string()))?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Success carrying a page of items plus a total count.
    pub fn into_page<T: DeserializeOwned>(self) -> Result<Page<T>, ApiError> {
        self.check_code()?;
        let total = self.total.unwrap_or(0);
        let data = self
            .data
            .ok_or_else(|| ApiError::Decode("missing data field".to_string()))?;
        let items = serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Page { items, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_ok_with_page() {
        let env: Envelope =
            serde_json::from_str(r#"{"code":200,"data":[{"id":1},{"id":2}],"total":13}"#).unwrap();
        #[derive(serde::Deserialize, Debug)]
        struct Row {
            id: i64,
        }
        let page = env.into_page::<Row>().unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].id, 2);
        assert_eq!(page.total, 13);
    }

    #[test]
    fn test_envelope_empty_search_is_not_an_error() {
        let env: Envelope =
            serde_json::from_str(r#"{"code":200,"data":[],"total":0}"#).unwrap();
        let page = env.into_page::<serde_json::Value>().unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_envelope_server_error() {
        let env: Envelope =
            serde_json::from_str(r#"{"code":500,"msg":"boom"}"#).unwrap();
        match env.into_ok() {
            Err(ApiError::Server { code, msg }) => {
                assert_eq!(code, 500);
                assert_eq!(msg, "boom");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_session_expired() {
        let env: Envelope =
            serde_json::from_str(r#"{"code":401,"msg":"login expired"}"#).unwrap();
        let err = env.into_ok().unwrap_err();
        assert!(err.is_session_expired());
    }
}
