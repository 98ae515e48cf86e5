use gpui::{
    div, linear_color_stop, linear_gradient, prelude::FluentBuilder as _, px, relative,
    rgb, AppContext as _, Bounds, Context, DragMoveEvent, Empty, Entity, EntityId, Hsla,
    InteractiveElement as _, IntoElement, MouseButton, MouseDownEvent, ParentElement as _, Pixels,
    Point, Render, SharedString, StatefulInteractiveElement as _, Styled as _, Subscription,
    Window,
};
use gpui_component::{
    h_flex,
    input::{Input, InputEvent, InputState},
    slider::{Slider, SliderEvent, SliderState},
    switch::Switch,
    v_flex, ActiveTheme as _, IconName,
};

use crate::{
    binding::ControlValue,
    card::ControlCard,
    color::{
        canonical_hex, hex_to_hsb, hsb_to_hex, hue_at, saturation_brightness_at, with_alpha,
        HexColor, Hsb, DEFAULT_COLOR,
    },
    element_ext::ElementExt as _,
};

const FIELD_HEIGHT: f32 = 128.;
const THUMB_SIZE: f32 = 12.;

/// Color stops of the hue strip, one segment between each pair.
const HUE_STOPS: [u32; 7] = [
    0xFF0000, 0xFFFF00, 0x00FF00, 0x00FFFF, 0x0000FF, 0xFF00FF, 0xFF0000,
];

/// The hex value the picker works on, empty values show as white.
pub fn displayed_hex(value: &str) -> String {
    if value.trim().is_empty() {
        return DEFAULT_COLOR.to_string();
    }
    canonical_hex(value, true).unwrap_or_else(|| value.to_string())
}

/// The value to commit for typed hex text, `None` while the text is
/// incomplete.
///
/// While alpha is enabled only `#RRGGBBAA` is complete, the switch is the
/// only way to drop the alpha channel.
pub fn typed_hex(text: &str, alpha_enabled: bool) -> Option<String> {
    let color = HexColor::parse(text.trim()).ok()?;
    (color.a.is_some() == alpha_enabled).then(|| color.to_hex())
}

/// Gray colors carry no hue, keep the last meaningful one for the field.
fn remembered_hue(previous: f32, hsb: Hsb) -> f32 {
    if hsb.s > 0. && hsb.b > 0. {
        hsb.h
    } else {
        previous
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PickerArea {
    Field,
    Hue,
}

#[derive(Clone)]
struct PickerDrag {
    owner: EntityId,
    area: PickerArea,
}

impl Render for PickerDrag {
    fn render(&mut self, _: &mut Window, _: &mut Context<Self>) -> impl IntoElement {
        Empty
    }
}

/// Hex color control with a saturation/brightness field, a hue strip and an
/// optional alpha channel.
pub struct ColorPicker {
    title: SharedString,
    description: SharedString,
    value: ControlValue<String>,
    open: bool,
    hue: f32,
    field_bounds: Bounds<Pixels>,
    hue_bounds: Bounds<Pixels>,
    hex_input: Entity<InputState>,
    alpha_slider: Entity<SliderState>,
    synced: String,
    _subscriptions: Vec<Subscription>,
}

impl ColorPicker {
    pub fn new(
        title: impl Into<SharedString>,
        value: ControlValue<String>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let current = displayed_hex(&value.get(cx));
        let hsb = hex_to_hsb(&current);

        let hex_input = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder("#RRGGBB")
                .default_value(current.clone())
        });
        let alpha_slider = cx.new(|_| {
            SliderState::new()
                .min(0.)
                .max(255.)
                .step(1.)
                .default_value(hsb.a.unwrap_or(u8::MAX) as f32)
        });

        let _subscriptions = vec![
            cx.subscribe_in(&hex_input, window, Self::on_input_event),
            cx.subscribe_in(&alpha_slider, window, Self::on_alpha_event),
        ];

        Self {
            title: title.into(),
            description: SharedString::default(),
            value,
            open: false,
            hue: hsb.h,
            field_bounds: Bounds::default(),
            hue_bounds: Bounds::default(),
            hex_input,
            alpha_slider,
            synced: current,
            _subscriptions,
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    fn current(&self, cx: &Context<Self>) -> String {
        displayed_hex(&self.value.get(cx))
    }

    fn commit(&mut self, hex: String, window: &mut Window, cx: &mut Context<Self>) {
        if hex == self.value.get(cx) {
            return;
        }

        tracing::trace!("color picked {}", hex);
        self.value.set(hex, cx);
        self.sync(window, cx);
        cx.notify();
    }

    /// Bring the input, slider and remembered hue in line with the bound value.
    fn sync(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let current = self.current(cx);
        if current == self.synced {
            return;
        }
        self.synced = current.clone();

        let hsb = hex_to_hsb(&current);
        self.hue = remembered_hue(self.hue, hsb);

        let shown = self.hex_input.read(cx).value().to_string();
        if canonical_hex(&shown, true).as_deref() != Some(current.as_str()) {
            self.hex_input.update(cx, |input, cx| {
                input.set_value(current, window, cx);
            });
        }

        if let Some(a) = hsb.a {
            self.alpha_slider.update(cx, |slider, cx| {
                slider.set_value(a as f32, window, cx);
            });
        }
    }

    fn toggle_open(&mut self, _: &gpui::ClickEvent, _: &mut Window, cx: &mut Context<Self>) {
        self.open = !self.open;
        cx.notify();
    }

    fn pick(
        &mut self,
        area: PickerArea,
        position: Point<Pixels>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let current = hex_to_hsb(&self.current(cx));

        let next = match area {
            PickerArea::Field => {
                let bounds = self.field_bounds;
                let local = position - bounds.origin;
                let (s, b) = saturation_brightness_at(
                    local.x.into(),
                    local.y.into(),
                    bounds.size.width.into(),
                    bounds.size.height.into(),
                );
                Hsb::new(self.hue, s, b).alpha(current.a)
            }
            PickerArea::Hue => {
                let bounds = self.hue_bounds;
                let local = position - bounds.origin;
                self.hue = hue_at(local.x.into(), bounds.size.width.into());
                Hsb::new(self.hue, current.s, current.b).alpha(current.a)
            }
        };

        self.commit(hsb_to_hex(next), window, cx);
    }

    fn on_mouse_down(
        &mut self,
        area: PickerArea,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.pick(area, event.position, window, cx);
    }

    fn on_drag_move(
        &mut self,
        event: &DragMoveEvent<PickerDrag>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let drag = event.drag(cx);
        if drag.owner != cx.entity_id() {
            return;
        }

        let area = drag.area;
        self.pick(area, event.event.position, window, cx);
    }

    fn on_input_event(
        &mut self,
        input: &Entity<InputState>,
        event: &InputEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match event {
            InputEvent::Change | InputEvent::PressEnter { .. } => {
                let text = input.read(cx).value().to_string();
                let alpha_enabled = hex_to_hsb(&self.current(cx)).a.is_some();
                match typed_hex(&text, alpha_enabled) {
                    Some(hex) => self.commit(hex, window, cx),
                    None => tracing::trace!("incomplete hex {:?}", text),
                }
            }
            InputEvent::Blur => {
                // Show the committed value again.
                self.synced.clear();
                self.sync(window, cx);
            }
            _ => {}
        }
    }

    fn on_alpha_event(
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

        let Ok(mut color) = HexColor::parse(&self.current(cx)) else {
            return;
        };
        if color.a.is_none() {
            return;
        }

        color.a = Some(value.start().round().clamp(0., 255.) as u8);
        self.commit(color.to_hex(), window, cx);
    }

    fn set_alpha_enabled(&mut self, enabled: bool, window: &mut Window, cx: &mut Context<Self>) {
        let next = with_alpha(&self.current(cx), enabled);
        self.commit(next, window, cx);
    }

    fn render_field(&self, hsb: Hsb, cx: &mut Context<Self>) -> impl IntoElement {
        let view = cx.entity();
        let owner = cx.entity_id();
        let base: Hsla = HexColor::from_hsb(Hsb::new(self.hue, 100., 100.))
            .to_rgba()
            .into();

        div()
            .id("saturation-brightness")
            .relative()
            .w_full()
            .h(px(FIELD_HEIGHT))
            .rounded(cx.theme().radius)
            .overflow_hidden()
            .cursor_crosshair()
            .bg(base)
            .child(
                div().absolute().size_full().bg(linear_gradient(
                    90.,
                    linear_color_stop(gpui::white(), 0.),
                    linear_color_stop(gpui::transparent_white(), 1.),
                )),
            )
            .child(
                div().absolute().size_full().bg(linear_gradient(
                    180.,
                    linear_color_stop(gpui::transparent_black(), 0.),
                    linear_color_stop(gpui::black(), 1.),
                )),
            )
            .child(
                div()
                    .absolute()
                    .left(relative(hsb.s / 100.))
                    .top(relative(1. - hsb.b / 100.))
                    .ml(px(-THUMB_SIZE / 2.))
                    .mt(px(-THUMB_SIZE / 2.))
                    .size(px(THUMB_SIZE))
                    .rounded_full()
                    .border_2()
                    .border_color(gpui::white())
                    .shadow_sm(),
            )
            .on_prepaint(move |bounds, _, cx| {
                view.update(cx, |this, _| this.field_bounds = bounds)
            })
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev: &MouseDownEvent, window, cx| {
                    this.on_mouse_down(PickerArea::Field, ev, window, cx)
                }),
            )
            .on_drag(
                PickerDrag {
                    owner,
                    area: PickerArea::Field,
                },
                |drag, _, _, cx| {
                    cx.stop_propagation();
                    cx.new(|_| drag.clone())
                },
            )
            .on_drag_move(cx.listener(Self::on_drag_move))
    }

    fn render_hue_strip(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let view = cx.entity();
        let owner = cx.entity_id();

        h_flex()
            .id("hue")
            .relative()
            .w_full()
            .h(px(THUMB_SIZE))
            .rounded(cx.theme().radius)
            .overflow_hidden()
            .cursor_pointer()
            .children(HUE_STOPS.windows(2).map(|pair| {
                div().flex_1().h_full().bg(linear_gradient(
                    90.,
                    linear_color_stop(rgb(pair[0]), 0.),
                    linear_color_stop(rgb(pair[1]), 1.),
                ))
            }))
            .child(
                div()
                    .absolute()
                    .top_0()
                    .left(relative(self.hue / 360.))
                    .ml(px(-2.))
                    .w(px(4.))
                    .h_full()
                    .rounded_sm()
                    .bg(gpui::white())
                    .shadow_sm(),
            )
            .on_prepaint(move |bounds, _, cx| {
                view.update(cx, |this, _| this.hue_bounds = bounds)
            })
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev: &MouseDownEvent, window, cx| {
                    this.on_mouse_down(PickerArea::Hue, ev, window, cx)
                }),
            )
            .on_drag(
                PickerDrag {
                    owner,
                    area: PickerArea::Hue,
                },
                |drag, _, _, cx| {
                    cx.stop_propagation();
                    cx.new(|_| drag.clone())
                },
            )
            .on_drag_move(cx.listener(Self::on_drag_move))
    }
}

impl Render for ColorPicker {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.sync(window, cx);

        let current = self.current(cx);
        let hsb = hex_to_hsb(&current);
        let swatch: Hsla = HexColor::parse(&current)
            .map(|color| color.to_rgba().into())
            .unwrap_or_else(|_| gpui::white());
        let has_alpha = hsb.a.is_some();
        let (h, s, b) = hsb.rounded();

        ControlCard::new("color-picker", self.title.clone())
            .description(self.description.clone())
            .icon(IconName::Palette)
            .suffix(
                div()
                    .id("swatch")
                    .size(px(36.))
                    .rounded(cx.theme().radius)
                    .border_1()
                    .border_color(cx.theme().border)
                    .bg(swatch)
                    .cursor_pointer()
                    .on_click(cx.listener(Self::toggle_open)),
            )
            .when(self.open, |this| {
                this.child(
                    v_flex()
                        .gap_3()
                        .child(self.render_field(hsb, cx))
                        .child(self.render_hue_strip(cx))
                        .child(Input::new(&self.hex_input))
                        .child(
                            h_flex()
                                .gap_3()
                                .child(
                                    Switch::new("alpha")
                                        .checked(has_alpha)
                                        .label("Alpha")
                                        .on_click(cx.listener(|this, checked: &bool, window, cx| {
                                            this.set_alpha_enabled(*checked, window, cx)
                                        })),
                                )
                                .when(has_alpha, |this| {
                                    this.child(
                                        div().flex_1().child(Slider::new(&self.alpha_slider)),
                                    )
                                }),
                        )
                        .child(
                            div()
                                .text_xs()
                                .text_color(cx.theme().muted_foreground)
                                .child(format!("H {}°  S {}%  B {}%", h, s, b)),
                        ),
                )
            })
    }
}
