use gpui::{
    div, prelude::FluentBuilder as _, px, App, AppContext as _, Context, Entity, IntoElement,
    ParentElement as _, Render, SharedString, Styled as _, Subscription, Window,
};
use gpui_component::{
    h_flex,
    input::{Input, InputEvent, InputState},
    select::{Select, SelectEvent, SelectState},
    v_flex, ActiveTheme as _, IndexPath,
};

use crate::{
    binding::ControlValue,
    card::ControlCard,
    validate::{char_count, line_count, TextLimit},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextOptions {
    pub placeholder: Option<SharedString>,
    /// Maximum number of characters, edits past it are rejected.
    pub max_length: Option<usize>,
    /// Maximum number of lines, only used by [`TextArea`].
    pub max_lines: Option<usize>,
}

impl TextOptions {
    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    fn limit(&self) -> TextLimit {
        TextLimit {
            max_length: self.max_length,
            max_lines: self.max_lines,
        }
    }
}

/// Shared editing logic for the single and multi line text controls.
struct TextBinding {
    value: ControlValue<String>,
    limit: TextLimit,
    input: Entity<InputState>,
    synced: String,
}

impl TextBinding {
    fn on_change(&mut self, window: &mut Window, cx: &mut App) -> bool {
        let text = self.input.read(cx).value().to_string();
        if text == self.synced {
            return false;
        }

        match self.limit.check(&text) {
            Ok(()) => {
                self.value.set(text.clone(), cx);
                self.synced = text;
                true
            }
            Err(err) => {
                tracing::debug!("rejected text edit: {}", err);
                let current = self.synced.clone();
                self.input.update(cx, |input, cx| {
                    input.set_value(current, window, cx);
                });
                false
            }
        }
    }

    /// Pull the host value into the input when it changed elsewhere.
    fn sync(&mut self, window: &mut Window, cx: &mut App) -> String {
        let current = self.value.get(cx);
        if current != self.synced {
            self.synced = current.clone();
            if self.input.read(cx).value().to_string() != current {
                let text = current.clone();
                self.input.update(cx, |input, cx| {
                    input.set_value(text, window, cx);
                });
            }
        }
        current
    }
}

fn counter(label: String, cx: &App) -> impl IntoElement {
    div()
        .text_xs()
        .text_color(cx.theme().muted_foreground)
        .child(label)
}

/// A single line text field.
pub struct TextInput {
    title: SharedString,
    description: SharedString,
    options: TextOptions,
    binding: TextBinding,
    _subscriptions: Vec<Subscription>,
}

impl TextInput {
    pub fn new(
        title: impl Into<SharedString>,
        value: ControlValue<String>,
        options: TextOptions,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let current = value.get(cx);
        let input = cx.new(|cx| {
            let state = InputState::new(window, cx).default_value(current.clone());
            match options.placeholder.clone() {
                Some(placeholder) => state.placeholder(placeholder),
                None => state,
            }
        });
        let _subscriptions = vec![cx.subscribe_in(&input, window, Self::on_input_event)];

        Self {
            title: title.into(),
            description: SharedString::default(),
            binding: TextBinding {
                value,
                limit: TextLimit {
                    max_length: options.max_length,
                    max_lines: None,
                },
                input,
                synced: current,
            },
            options,
            _subscriptions,
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    fn on_input_event(
        &mut self,
        _: &Entity<InputState>,
        event: &InputEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if let InputEvent::Change = event {
            if self.binding.on_change(window, cx) {
                cx.notify();
            }
        }
    }
}

impl Render for TextInput {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let current = self.binding.sync(window, cx);

        ControlCard::new("text-input", self.title.clone())
            .description(self.description.clone())
            .child(Input::new(&self.binding.input).w_full())
            .when_some(self.options.max_length, |this, max| {
                this.child(
                    h_flex()
                        .justify_end()
                        .child(counter(format!("{} / {}", char_count(&current), max), cx)),
                )
            })
    }
}

/// A multi line text field with optional character and line limits.
pub struct TextArea {
    title: SharedString,
    description: SharedString,
    options: TextOptions,
    binding: TextBinding,
    _subscriptions: Vec<Subscription>,
}

impl TextArea {
    pub fn new(
        title: impl Into<SharedString>,
        value: ControlValue<String>,
        options: TextOptions,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let current = value.get(cx);
        let input = cx.new(|cx| {
            let state = InputState::new(window, cx)
                .multi_line(true)
                .default_value(current.clone());
            match options.placeholder.clone() {
                Some(placeholder) => state.placeholder(placeholder),
                None => state,
            }
        });
        let _subscriptions = vec![cx.subscribe_in(&input, window, Self::on_input_event)];

        Self {
            title: title.into(),
            description: SharedString::default(),
            binding: TextBinding {
                value,
                limit: options.limit(),
                input,
                synced: current,
            },
            options,
            _subscriptions,
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    fn on_input_event(
        &mut self,
        _: &Entity<InputState>,
        event: &InputEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if let InputEvent::Change = event {
            if self.binding.on_change(window, cx) {
                cx.notify();
            }
        }
    }
}

impl Render for TextArea {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let current = self.binding.sync(window, cx);

        ControlCard::new("text-area", self.title.clone())
            .description(self.description.clone())
            .child(Input::new(&self.binding.input).h(px(120.)))
            .child(
                v_flex()
                    .gap_1()
                    .when_some(self.options.max_length, |this, max| {
                        this.child(counter(
                            format!("{} / {} characters", char_count(&current), max),
                            cx,
                        ))
                    })
                    .when_some(self.options.max_lines, |this, max| {
                        this.child(counter(
                            format!("{} / {} lines", line_count(&current), max),
                            cx,
                        ))
                    }),
            )
    }
}

/// How a bound value maps onto the option list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The value is the option at this index.
    Current(usize),
    /// The value is empty or unknown, the first option replaces it.
    Fallback,
    /// There is nothing to select.
    Empty,
}

pub fn resolve_selection(value: &str, options: &[SharedString]) -> Selection {
    if options.is_empty() {
        return Selection::Empty;
    }

    match options.iter().position(|option| AsRef::<str>::as_ref(option) == value) {
        Some(ix) if !value.is_empty() => Selection::Current(ix),
        _ => Selection::Fallback,
    }
}

/// Pick one string out of a fixed list.
pub struct TextSelector {
    title: SharedString,
    description: SharedString,
    value: ControlValue<String>,
    options: Vec<SharedString>,
    select: Entity<SelectState<Vec<SharedString>>>,
    synced: Option<String>,
    _subscriptions: Vec<Subscription>,
}

impl TextSelector {
    pub fn new(
        title: impl Into<SharedString>,
        value: ControlValue<String>,
        options: Vec<SharedString>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let current = value.get(cx);
        let selected = match resolve_selection(&current, &options) {
            Selection::Current(ix) => Some(IndexPath::default().row(ix)),
            Selection::Fallback => Some(IndexPath::default()),
            Selection::Empty => None,
        };

        let items = options.clone();
        let select = cx.new(|cx| SelectState::new(items, selected, window, cx));
        let _subscriptions = vec![cx.subscribe_in(&select, window, Self::on_select_event)];

        Self {
            title: title.into(),
            description: SharedString::default(),
            value,
            options,
            select,
            synced: None,
            _subscriptions,
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    fn on_select_event(
        &mut self,
        _: &Entity<SelectState<Vec<SharedString>>>,
        event: &SelectEvent<Vec<SharedString>>,
        _: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if let SelectEvent::Confirm(Some(selected)) = event {
            let next = selected.to_string();
            if next != self.value.get(cx) {
                self.synced = Some(next.clone());
                self.value.set(next, cx);
                cx.notify();
            }
        }
    }
}

impl Render for TextSelector {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let current = self.value.get(cx);
        if self.synced.as_ref() != Some(&current) {
            self.synced = Some(current.clone());

            match resolve_selection(&current, &self.options) {
                Selection::Current(ix) => {
                    self.select.update(cx, |select, cx| {
                        select.set_selected_index(Some(IndexPath::default().row(ix)), window, cx);
                    });
                }
                Selection::Fallback => {
                    if let Some(first) = self.options.first().map(|first| first.to_string()) {
                        tracing::debug!("{:?} is not an option, selecting {:?}", current, first);
                        self.select.update(cx, |select, cx| {
                            select.set_selected_index(Some(IndexPath::default()), window, cx);
                        });
                        let value = self.value.clone();
                        cx.defer(move |cx| value.set(first, cx));
                    }
                }
                Selection::Empty => {}
            }
        }

        ControlCard::new("text-selector", self.title.clone())
            .description(self.description.clone())
            .child(div().w_full().child(Select::new(&self.select)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<SharedString> {
        vec!["small".into(), "medium".into(), "large".into()]
    }

    #[test]
    fn test_resolve_selection() {
        assert_eq!(resolve_selection("medium", &options()), Selection::Current(1));
        assert_eq!(resolve_selection("small", &options()), Selection::Current(0));
    }

    #[test]
    fn test_resolve_selection_falls_back_to_first() {
        assert_eq!(resolve_selection("", &options()), Selection::Fallback);
        assert_eq!(resolve_selection("huge", &options()), Selection::Fallback);
        assert_eq!(resolve_selection("Medium", &options()), Selection::Fallback);
    }

    #[test]
    fn test_resolve_selection_without_options() {
        assert_eq!(resolve_selection("", &[]), Selection::Empty);
        assert_eq!(resolve_selection("small", &[]), Selection::Empty);
    }

    #[test]
    fn test_text_options_limit() {
        let options = TextOptions::default().max_length(10).max_lines(2);
        assert_eq!(
            options.limit(),
            TextLimit {
                max_length: Some(10),
                max_lines: Some(2)
            }
        );
        assert!(options.limit().check("one\ntwo").is_ok());
        assert!(options.limit().check("one\ntwo\nthree").is_err());
    }
}
