use serde::{Deserialize, Serialize};
use std::fmt::Display;
use validator::Validate;
use wasm_bindgen::prelude::*;

pub fn to_js_error(error: impl Display) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

/// An extension trait for `Result` to allow us to add custom methods
pub trait ResultExt<T, E> {
    /// Helper to convert any result to a result with a JS error value.
    fn into_js(self) -> Result<T, JsValue>;
}

impl<T, E: Display> ResultExt<T, E> for Result<T, E> {
    fn into_js(self) -> Result<T, JsValue> {
        self.map_err(to_js_error)
    }
}

/// Deserialize a config from a JS object and validate it. Missing fields are
/// populated with defaults, so `undefined`/`{}` gives the default config.
pub fn parse_config<R>(input: &JsValue) -> Result<R, JsValue>
where
    R: Default + for<'a> Deserialize<'a> + Validate,
{
    let config: R = if input.is_undefined() || input.is_null() {
        R::default()
    } else {
        input.into_serde().into_js()?
    };
    config.validate().into_js()?;
    Ok(config)
}

/// Verify that the given JS object is a valid config, and return it with all
/// defaults populated. The return value is **re-serialized**, so it's a plain
/// JS object rather than a Rust value.
pub fn validate_config<R>(input: &JsValue) -> Result<JsValue, JsValue>
where
    R: Default + Serialize + for<'a> Deserialize<'a> + Validate,
{
    let config: R = parse_config(input)?;
    JsValue::from_serde(&config).into_js()
}
