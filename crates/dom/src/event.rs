use crate::target::NativePoint;

/// The kind of edit an input notification asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputIntent {
	/// Insert the event's text at the selection.
	InsertText,
	/// Split the current block.
	InsertParagraph,
	/// Delete backwards from the selection.
	DeleteContentBackward,
	/// Anything else, carried by its platform name.
	Other(String),
}

impl InputIntent {
	/// Parses a platform `inputType` string.
	pub fn from_input_type(input_type: &str) -> Self {
		match input_type {
			"insertText" => Self::InsertText,
			"insertParagraph" => Self::InsertParagraph,
			"deleteContentBackward" => Self::DeleteContentBackward,
			other => Self::Other(other.to_owned()),
		}
	}

	/// Returns the platform `inputType` string.
	pub fn as_input_type(&self) -> &str {
		match self {
			Self::InsertText => "insertText",
			Self::InsertParagraph => "insertParagraph",
			Self::DeleteContentBackward => "deleteContentBackward",
			Self::Other(name) => name,
		}
	}
}

/// A native range the platform says an input will affect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticRange {
	/// Start of the range.
	pub start: NativePoint,
	/// End of the range.
	pub end: NativePoint,
}

/// A before-input notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
	/// What the input asks for.
	pub intent: InputIntent,
	/// Text carried by the input, if any.
	pub data: Option<String>,
	/// The native range the input targets, if reported.
	pub target_range: Option<StaticRange>,
}

impl InputEvent {
	/// Creates an event with no data and no target range.
	pub fn new(intent: InputIntent) -> Self {
		Self {
			intent,
			data: None,
			target_range: None,
		}
	}

	/// Creates an `insertText` event.
	pub fn insert_text(text: impl Into<String>) -> Self {
		Self {
			data: Some(text.into()),
			..Self::new(InputIntent::InsertText)
		}
	}

	/// Attaches a target range.
	pub fn with_target_range(mut self, start: NativePoint, end: NativePoint) -> Self {
		self.target_range = Some(StaticRange { start, end });
		self
	}
}

/// A notification delivered by the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
	/// The native selection changed.
	SelectionChange,
	/// An input is about to happen.
	BeforeInput(InputEvent),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn input_types_round_trip() {
		for name in ["insertText", "insertParagraph", "deleteContentBackward", "formatBold"] {
			assert_eq!(InputIntent::from_input_type(name).as_input_type(), name);
		}
		assert_eq!(
			InputIntent::from_input_type("insertLineBreak"),
			InputIntent::Other("insertLineBreak".into())
		);
	}

	#[test]
	fn insert_text_carries_data() {
		let event = InputEvent::insert_text("!");
		assert_eq!(event.intent, InputIntent::InsertText);
		assert_eq!(event.data.as_deref(), Some("!"));
		assert!(event.target_range.is_none());
	}
}
