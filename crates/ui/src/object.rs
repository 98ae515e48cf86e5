use std::time::Duration;

use gpui::{
    div, prelude::FluentBuilder as _, px, AppContext as _, ClickEvent, ClipboardItem, Context,
    Entity, IntoElement, ParentElement as _, Pixels, Render, SharedString, Styled as _,
    Subscription, Task, Window,
};
use gpui_component::{
    button::{Button, ButtonVariants as _},
    input::{Input, InputEvent, InputState},
    ActiveTheme as _, Disableable as _, IconName, Sizable as _,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{binding::ControlValue, card::ControlCard, error::ControlError};

const COPIED_RESET: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectOptions {
    /// Editor height, default is `200px`.
    pub height: Pixels,
    pub read_only: bool,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        Self {
            height: px(200.),
            read_only: false,
        }
    }
}

impl ObjectOptions {
    pub fn height(mut self, height: impl Into<Pixels>) -> Self {
        self.height = height.into();
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

/// Outcome of reading the editor text.
#[derive(Debug, PartialEq)]
pub enum JsonCheck<T> {
    /// Blank text, neither committed nor reported.
    Neutral,
    Valid(T),
    Invalid(ControlError),
}

pub fn check_json<T: DeserializeOwned>(text: &str) -> JsonCheck<T> {
    if text.trim().is_empty() {
        return JsonCheck::Neutral;
    }

    match serde_json::from_str::<T>(text) {
        Ok(value) => JsonCheck::Valid(value),
        Err(err) => JsonCheck::Invalid(ControlError::InvalidJson(err.to_string())),
    }
}

/// Serialize with a 2 space indent.
pub fn to_pretty_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!("failed to serialize object: {}", err);
            String::new()
        }
    }
}

/// JSON editor for any serde value.
///
/// The text is seeded from the bound value once, afterwards every valid edit
/// is committed back.
pub struct ObjectEditor<T> {
    title: SharedString,
    description: SharedString,
    value: ControlValue<T>,
    options: ObjectOptions,
    editor: Entity<InputState>,
    error: Option<SharedString>,
    copied: bool,
    _copied_task: Option<Task<()>>,
    _subscriptions: Vec<Subscription>,
}

impl<T> ObjectEditor<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    pub fn new(
        title: impl Into<SharedString>,
        value: ControlValue<T>,
        options: ObjectOptions,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let text = to_pretty_json(&value.get(cx));
        let editor = cx.new(|cx| {
            InputState::new(window, cx)
                .code_editor("json")
                .multi_line(true)
                .default_value(text)
        });
        let _subscriptions = vec![cx.subscribe_in(&editor, window, Self::on_input_event)];

        Self {
            title: title.into(),
            description: SharedString::default(),
            value,
            options,
            editor,
            error: None,
            copied: false,
            _copied_task: None,
            _subscriptions,
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    fn on_input_event(
        &mut self,
        input: &Entity<InputState>,
        event: &InputEvent,
        _: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !matches!(event, InputEvent::Change) || self.options.read_only {
            return;
        }

        let text = input.read(cx).value();
        match check_json::<T>(&text) {
            JsonCheck::Neutral => self.error = None,
            JsonCheck::Valid(value) => {
                self.error = None;
                self.value.set(value, cx);
            }
            JsonCheck::Invalid(err) => {
                if let ControlError::InvalidJson(detail) = &err {
                    tracing::debug!("object editor: {}", detail);
                }
                self.error = Some(err.to_string().into());
            }
        }
        cx.notify();
    }

    fn copy(&mut self, _: &ClickEvent, _: &mut Window, cx: &mut Context<Self>) {
        let text = self.editor.read(cx).value().to_string();
        if text.is_empty() {
            return;
        }

        cx.write_to_clipboard(ClipboardItem::new_string(text));
        self.copied = true;
        self._copied_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(COPIED_RESET).await;
            this.update(cx, |this, cx| {
                this.copied = false;
                cx.notify();
            })
            .ok();
        }));
        cx.notify();
    }
}

impl<T> Render for ObjectEditor<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        ControlCard::new("object-editor", self.title.clone())
            .description(self.description.clone())
            .icon(IconName::File)
            .suffix(
                Button::new("copy")
                    .outline()
                    .small()
                    .icon(if self.copied {
                        IconName::Check
                    } else {
                        IconName::Copy
                    })
                    .on_click(cx.listener(Self::copy)),
            )
            .child(
                Input::new(&self.editor)
                    .h(self.options.height)
                    .disabled(self.options.read_only),
            )
            .when_some(self.error.clone(), |this, error| {
                this.child(div().text_sm().text_color(cx.theme().danger).child(error))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Profile {
        name: String,
        age: u32,
        tags: Vec<String>,
    }

    #[test]
    fn test_check_json_valid() {
        let text = indoc! {r#"
            {
              "name": "Ada",
              "age": 36,
              "tags": ["math"]
            }
        "#};

        assert_eq!(
            check_json::<Profile>(text),
            JsonCheck::Valid(Profile {
                name: "Ada".into(),
                age: 36,
                tags: vec!["math".into()],
            })
        );
    }

    #[test]
    fn test_check_json_blank_is_neutral() {
        assert_eq!(check_json::<Profile>(""), JsonCheck::Neutral);
        assert_eq!(check_json::<Profile>("  \n\t"), JsonCheck::Neutral);
    }

    #[test]
    fn test_check_json_invalid() {
        let JsonCheck::Invalid(err) = check_json::<Profile>(r#"{"name": "Ada","#) else {
            panic!("expected invalid json");
        };
        assert_eq!(err.to_string(), "invalid JSON format");

        // Valid JSON of the wrong shape is rejected too.
        assert!(matches!(
            check_json::<Profile>(r#"{"name": 1}"#),
            JsonCheck::Invalid(_)
        ));
    }

    #[test]
    fn test_to_pretty_json() {
        let profile = Profile {
            name: "Ada".into(),
            age: 36,
            tags: vec!["math".into(), "engines".into()],
        };

        assert_eq!(
            to_pretty_json(&profile),
            indoc! {r#"
                {
                  "name": "Ada",
                  "age": 36,
                  "tags": [
                    "math",
                    "engines"
                  ]
                }"#}
        );
    }

    #[test]
    fn test_default_options() {
        let options = ObjectOptions::default();
        assert_eq!(options.height, px(200.));
        assert!(!options.read_only);
    }
}
