use gpui::{
    prelude::FluentBuilder as _, px, App, AppContext as _, Context, Entity, IntoElement,
    ParentElement as _, Render, SharedString, Styled as _, Subscription, Window,
};
use gpui_component::{
    button::{Button, ButtonVariants as _},
    h_flex,
    input::{Input, InputEvent, InputState},
    slider::{Slider, SliderEvent, SliderState},
    v_flex, Disableable as _, IconName, Sizable as _,
};

use crate::{
    binding::ControlValue,
    card::ControlCard,
    validate::{format_number, widen_f32, NumberRange},
};

#[derive(Clone, Debug, PartialEq)]
pub struct NumberOptions {
    /// The minimum accepted value, default is `-inf`.
    pub min: f64,
    /// The maximum accepted value, default is `+inf`.
    pub max: f64,
    /// Amount added or removed by the step buttons, default is `1.0`.
    pub step: f64,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            step: 1.0,
        }
    }
}

impl NumberOptions {
    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn range(&self) -> NumberRange {
        NumberRange::new(self.min, self.max)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliderOptions {
    /// Default is `0.0`.
    pub min: f64,
    /// Default is `100.0`.
    pub max: f64,
    /// Default is `1.0`.
    pub step: f64,
    /// Show a numeric input under the slider, default is `true`.
    pub show_input: bool,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            min: 0.,
            max: 100.,
            step: 1.,
            show_input: true,
        }
    }
}

impl SliderOptions {
    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn show_input(mut self, show_input: bool) -> Self {
        self.show_input = show_input;
        self
    }

    pub fn range(&self) -> NumberRange {
        NumberRange::new(self.min, self.max)
    }
}

/// Commit typed text when it parses and lies in `range`, returns the new value.
fn commit_text(
    text: &str,
    range: NumberRange,
    value: &ControlValue<f64>,
    cx: &mut App,
) -> Option<f64> {
    match range.parse(text) {
        Ok(next) => {
            if next != value.get(cx) {
                value.set(next, cx);
            }
            Some(next)
        }
        Err(err) => {
            tracing::debug!("ignored number input: {}", err);
            None
        }
    }
}

/// Push `current` into the input unless it already shows that number.
fn sync_input(
    input: &Entity<InputState>,
    current: f64,
    window: &mut Window,
    cx: &mut App,
) {
    let shown = input.read(cx).value();
    if shown.trim().parse::<f64>().ok() == Some(current) {
        return;
    }

    input.update(cx, |input, cx| {
        input.set_value(format_number(current), window, cx);
    });
}

/// A numeric text field with step buttons.
pub struct NumberInput {
    title: SharedString,
    description: SharedString,
    value: ControlValue<f64>,
    options: NumberOptions,
    input: Entity<InputState>,
    synced: f64,
    _subscriptions: Vec<Subscription>,
}

impl NumberInput {
    pub fn new(
        title: impl Into<SharedString>,
        value: ControlValue<f64>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let current = value.get(cx);
        let input = cx.new(|cx| InputState::new(window, cx).default_value(format_number(current)));
        let _subscriptions = vec![cx.subscribe_in(&input, window, Self::on_input_event)];

        Self {
            title: title.into(),
            description: SharedString::default(),
            value,
            options: NumberOptions::default(),
            input,
            synced: current,
            _subscriptions,
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    pub fn options(mut self, options: NumberOptions) -> Self {
        self.options = options;
        self
    }

    fn on_input_event(
        &mut self,
        input: &Entity<InputState>,
        event: &InputEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match event {
            InputEvent::Change => {
                let text = input.read(cx).value();
                if let Some(next) = commit_text(&text, self.options.range(), &self.value, cx) {
                    self.synced = next;
                    cx.notify();
                }
            }
            InputEvent::Blur => {
                // Drop whatever invalid text is left.
                let current = self.value.get(cx);
                sync_input(&self.input, current, window, cx);
            }
            _ => {}
        }
    }

    fn step(&mut self, direction: f64, _: &mut Window, cx: &mut Context<Self>) {
        let current = self.value.get(cx);
        let range = self.options.range();
        if let Some(next) = range.step(current, direction * self.options.step) {
            self.value.set(next, cx);
            cx.notify();
        }
    }
}

impl Render for NumberInput {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let current = self.value.get(cx);
        if current != self.synced {
            self.synced = current;
            sync_input(&self.input, current, window, cx);
        }

        ControlCard::new("number-input", self.title.clone())
            .description(self.description.clone())
            .child(
                h_flex()
                    .gap_2()
                    .child(Input::new(&self.input).flex_1())
                    .child(
                        h_flex()
                            .gap_1()
                            .child(
                                Button::new("decrement")
                                    .outline()
                                    .small()
                                    .icon(IconName::Minus)
                                    .disabled(current <= self.options.min)
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.step(-1., window, cx)
                                    })),
                            )
                            .child(
                                Button::new("increment")
                                    .outline()
                                    .small()
                                    .icon(IconName::Plus)
                                    .disabled(current >= self.options.max)
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.step(1., window, cx)
                                    })),
                            ),
                    ),
            )
    }
}

/// A slider over a bounded range with an optional numeric input.
pub struct NumberSlider {
    title: SharedString,
    description: SharedString,
    value: ControlValue<f64>,
    options: SliderOptions,
    slider: Entity<SliderState>,
    input: Entity<InputState>,
    synced: f64,
    _subscriptions: Vec<Subscription>,
}

impl NumberSlider {
    pub fn new(
        title: impl Into<SharedString>,
        value: ControlValue<f64>,
        options: SliderOptions,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let current = value.get(cx);
        let slider = cx.new(|_| {
            SliderState::new()
                .min(options.min as f32)
                .max(options.max as f32)
                .step(options.step as f32)
                .default_value(current as f32)
        });
        let input = cx.new(|cx| InputState::new(window, cx).default_value(format_number(current)));

        let _subscriptions = vec![
            cx.subscribe_in(&slider, window, Self::on_slider_event),
            cx.subscribe_in(&input, window, Self::on_input_event),
        ];

        Self {
            title: title.into(),
            description: SharedString::default(),
            value,
            options,
            slider,
            input,
            synced: current,
            _subscriptions,
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    fn on_slider_event(
        &mut self,
        _: &Entity<SliderState>,
        event: &SliderEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        #[allow(irrefutable_let_patterns)]
        let SliderEvent::Change(value) = event else {
            return;
        };
        let next = widen_f32(value.start());
        if next == self.value.get(cx) {
            return;
        }

        self.synced = next;
        self.value.set(next, cx);
        sync_input(&self.input, next, window, cx);
        cx.notify();
    }

    fn on_input_event(
        &mut self,
        input: &Entity<InputState>,
        event: &InputEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match event {
            InputEvent::Change => {
                let text = input.read(cx).value();
                if let Some(next) = commit_text(&text, self.options.range(), &self.value, cx) {
                    self.synced = next;
                    self.slider.update(cx, |slider, cx| {
                        slider.set_value(next as f32, window, cx);
                    });
                    cx.notify();
                }
            }
            InputEvent::Blur => {
                let current = self.value.get(cx);
                sync_input(&self.input, current, window, cx);
            }
            _ => {}
        }
    }
}

impl Render for NumberSlider {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let current = self.value.get(cx);
        if current != self.synced {
            self.synced = current;
            self.slider.update(cx, |slider, cx| {
                slider.set_value(current as f32, window, cx);
            });
            sync_input(&self.input, current, window, cx);
        }

        ControlCard::new("number-slider", self.title.clone())
            .description(self.description.clone())
            .suffix(format_number(current))
            .child(
                v_flex()
                    .gap_4()
                    .child(Slider::new(&self.slider))
                    .when(self.options.show_input, |this| {
                        this.child(Input::new(&self.input).w(px(96.)))
                    }),
            )
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use gpui::TestAppContext;
    use gpui_component::slider::SliderValue;

    use super::*;

    #[gpui::test]
    fn test_slider_reports_decimal_value(cx: &mut TestAppContext) {
        cx.update(|cx| crate::init(cx));
        let store = Rc::new(Cell::new(0.));
        let value = ControlValue::new(
            {
                let store = store.clone();
                move |_| store.get()
            },
            {
                let store = store.clone();
                move |v, _| store.set(v)
            },
        );
        let (view, cx) = cx.add_window_view(|window, cx| {
            NumberSlider::new(
                "Opacity",
                value,
                SliderOptions::default().min(0.).max(1.).step(0.1),
                window,
                cx,
            )
        });

        let slider = view.read_with(cx, |this, _| this.slider.clone());
        slider.update(cx, |_, cx| {
            cx.emit(SliderEvent::Change(SliderValue::from(0.3_f32)));
        });
        assert_eq!(store.get(), 0.3);

        let input = view.read_with(cx, |this, _| this.input.clone());
        assert_eq!(input.read_with(cx, |input, _| input.value().to_string()), "0.3");
    }
}
