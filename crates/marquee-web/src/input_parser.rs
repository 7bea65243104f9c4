#![forbid(unsafe_code)]

//! JSON input parser for converting host-encoded DOM events to
//! [`HostEvent`] values.
//!
//! The JS glue serializes each listener callback into a small JSON object and
//! hands it to [`parse_encoded_input`]. Supported shapes:
//!
//! ```json
//! {"kind":"pointer","phase":"down","pointerId":1,"pointerType":"touch","button":0,"x":10,"y":20}
//! {"kind":"pointer","phase":"enter"}
//! {"kind":"wheel","dx":-24,"dy":3}
//! {"kind":"key","key":"ArrowLeft","mods":0}
//! {"kind":"focus","phase":"out","relatedInside":false}
//! {"kind":"visibility","hidden":true}
//! {"kind":"resize","width":1280,"height":720}
//! {"kind":"click","index":2}
//! ```
//!
//! Feature-gated behind `input-parser` so hosts that build events directly
//! do not pull in `serde`.

use marquee_core::event::{
    HostEvent, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerKind, Visibility,
    WheelEvent,
};
use marquee_core::geometry::Point;
use serde::Deserialize;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown phase value for the given kind.
    UnknownPhase(String),
    /// Unknown event kind.
    UnknownKind(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownPhase(phase) => write!(f, "unknown phase: {phase}"),
            Self::UnknownKind(kind) => write!(f, "unknown input kind: {kind}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInput {
    kind: String,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    pointer_id: Option<u32>,
    #[serde(default)]
    pointer_type: Option<String>,
    #[serde(default)]
    button: Option<i16>,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
    #[serde(default)]
    dx: Option<f32>,
    #[serde(default)]
    dy: Option<f32>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    mods: Option<u8>,
    #[serde(default)]
    related_inside: Option<bool>,
    #[serde(default)]
    hidden: Option<bool>,
    #[serde(default)]
    width: Option<f32>,
    #[serde(default)]
    height: Option<f32>,
    #[serde(default)]
    index: Option<usize>,
}

/// Parse one JSON-encoded DOM event into a [`HostEvent`].
pub fn parse_encoded_input(json: &str) -> Result<HostEvent, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "pointer" => parse_pointer_event(&raw),
        "wheel" => Ok(HostEvent::Wheel(WheelEvent::new(
            raw.dx.unwrap_or(0.0),
            raw.dy.unwrap_or(0.0),
        ))),
        "key" => parse_key_event(&raw),
        "focus" => parse_focus_event(&raw),
        "visibility" => {
            let hidden = raw.hidden.ok_or(InputParseError::MissingField("hidden"))?;
            Ok(HostEvent::Visibility(if hidden {
                Visibility::Hidden
            } else {
                Visibility::Visible
            }))
        }
        "resize" => Ok(HostEvent::Resize {
            width: raw.width.ok_or(InputParseError::MissingField("width"))?,
            height: raw.height.ok_or(InputParseError::MissingField("height"))?,
        }),
        "click" => Ok(HostEvent::ItemClick {
            index: raw.index.ok_or(InputParseError::MissingField("index"))?,
        }),
        other => Err(InputParseError::UnknownKind(other.to_owned())),
    }
}

fn parse_pointer_kind(kind: Option<&str>) -> PointerKind {
    match kind {
        Some("touch") => PointerKind::Touch,
        Some("pen") => PointerKind::Pen,
        _ => PointerKind::Mouse,
    }
}

fn parse_pointer_event(raw: &RawInput) -> Result<HostEvent, InputParseError> {
    let phase = raw
        .phase
        .as_deref()
        .ok_or(InputParseError::MissingField("phase"))?;
    match phase {
        "enter" => return Ok(HostEvent::PointerEnter),
        "leave" => return Ok(HostEvent::PointerLeave),
        _ => {}
    }
    let pointer = PointerEvent {
        pointer_id: raw
            .pointer_id
            .ok_or(InputParseError::MissingField("pointerId"))?,
        kind: parse_pointer_kind(raw.pointer_type.as_deref()),
        button: PointerButton::from_dom(raw.button.unwrap_or(0)),
        position: Point::new(
            raw.x.ok_or(InputParseError::MissingField("x"))?,
            raw.y.ok_or(InputParseError::MissingField("y"))?,
        ),
    };
    match phase {
        "down" => Ok(HostEvent::PointerDown(pointer)),
        "move" => Ok(HostEvent::PointerMove(pointer)),
        "up" => Ok(HostEvent::PointerUp(pointer)),
        "cancel" => Ok(HostEvent::PointerCancel(pointer)),
        other => Err(InputParseError::UnknownPhase(other.to_owned())),
    }
}

fn parse_key_event(raw: &RawInput) -> Result<HostEvent, InputParseError> {
    let key = raw.key.as_deref().ok_or(InputParseError::MissingField("key"))?;
    let modifiers = Modifiers::from_bits_truncate(raw.mods.unwrap_or(0));
    Ok(HostEvent::Key(
        KeyEvent::new(KeyCode::from_dom_key(key)).with_modifiers(modifiers),
    ))
}

fn parse_focus_event(raw: &RawInput) -> Result<HostEvent, InputParseError> {
    match raw.phase.as_deref() {
        Some("in") => Ok(HostEvent::FocusIn),
        Some("out") => Ok(HostEvent::FocusOut {
            related_inside: raw.related_inside.unwrap_or(false),
        }),
        Some(other) => Err(InputParseError::UnknownPhase(other.to_owned())),
        None => Err(InputParseError::MissingField("phase")),
    }
}
