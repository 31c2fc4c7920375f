// Setup failures. Once a field is running nothing else can fail.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("no element with id `{0}`")]
    CanvasNotFound(String),

    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),

    #[error("canvas has no 2d rendering context")]
    ContextUnavailable,

    #[error("failed to register `{event}` listener: {message}")]
    Listener { event: String, message: String },

    #[error("requestAnimationFrame failed: {0}")]
    FrameRequest(String),
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> JsValue {
        js_sys::Error::new(&err.to_string()).into()
    }
}

// JS exceptions carry an arbitrary value; keep whatever text we can get out of it
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            EngineError::CanvasNotFound("hero".to_owned()).to_string(),
            "no element with id `hero`"
        );
        assert_eq!(
            EngineError::Listener {
                event: "resize".to_owned(),
                message: "denied".to_owned(),
            }
            .to_string(),
            "failed to register `resize` listener: denied"
        );
    }
}
