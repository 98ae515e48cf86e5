use gpui::{
    div, prelude::FluentBuilder as _, px, white, App, AppContext as _, Context, Entity, Hsla,
    IntoElement, ParentElement as _, Render, SharedString, Styled as _, Subscription, Window,
};
use gpui_component::{h_flex, v_flex, ActiveTheme as _, StyledExt as _};
use gpui_controls::{
    color::HexColor,
    validate::{NumberRange, TextLimit},
    BoolToggle, ColorPicker, ControlState, ControlValue, Dashboard, NumberArray,
    NumberArrayOptions, NumberInput, NumberOptions, NumberSlider, ObjectEditor, ObjectOptions,
    SliderOptions, TextArea, TextArray, TextArrayOptions, TextInput, TextOptions, TextSelector,
    ToggleOptions,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    pub padding: f64,
    pub shadow: bool,
    pub footer: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            padding: 16.,
            shadow: true,
            footer: Some("Made with GPUI".into()),
        }
    }
}

/// Properties of the previewed badge.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoState {
    pub label: String,
    pub caption: String,
    pub font_size: f64,
    pub radius: f64,
    pub visible: bool,
    pub align: String,
    pub color: String,
    pub bars: Vec<f64>,
    pub tags: Vec<String>,
    pub config: DemoConfig,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            label: "Hello, GPUI".into(),
            caption: "Every control on the left\nwrites into this badge.".into(),
            font_size: 20.,
            radius: 8.,
            visible: true,
            align: "center".into(),
            color: "#3B82F6".into(),
            bars: vec![120., 80., 200.],
            tags: vec!["rust".into(), "gpui".into()],
            config: DemoConfig::default(),
        }
    }
}

pub struct Gallery {
    state: ControlState<DemoState>,
    visible: ControlValue<bool>,
    label: Entity<TextInput>,
    caption: Entity<TextArea>,
    font_size: Entity<NumberInput>,
    radius: Entity<NumberSlider>,
    align: Entity<TextSelector>,
    color: Entity<ColorPicker>,
    bars: Entity<NumberArray>,
    tags: Entity<TextArray>,
    config: Entity<ObjectEditor<DemoConfig>>,
    _subscriptions: Vec<Subscription>,
}

impl Gallery {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let state = ControlState::new(DemoState::default(), cx);

        let label = cx.new(|cx| {
            TextInput::new(
                "Label",
                state.field(|s| s.label.clone(), |s, v| s.label = v),
                TextOptions::default()
                    .placeholder("Badge label")
                    .max_length(32),
                window,
                cx,
            )
        });
        let caption = cx.new(|cx| {
            TextArea::new(
                "Caption",
                state.field(|s| s.caption.clone(), |s, v| s.caption = v),
                TextOptions::default().max_length(200).max_lines(4),
                window,
                cx,
            )
            .description("Shown under the label.")
        });
        let font_size = cx.new(|cx| {
            NumberInput::new(
                "Font Size",
                state.field(|s| s.font_size, |s, v| s.font_size = v),
                window,
                cx,
            )
            .options(NumberOptions::default().min(10.).max(48.).step(2.))
        });
        let radius = cx.new(|cx| {
            NumberSlider::new(
                "Corner Radius",
                state.field(|s| s.radius, |s, v| s.radius = v),
                SliderOptions::default().min(0.).max(32.),
                window,
                cx,
            )
        });
        let align = cx.new(|cx| {
            TextSelector::new(
                "Alignment",
                state.field(|s| s.align.clone(), |s, v| s.align = v),
                vec!["start".into(), "center".into(), "end".into()],
                window,
                cx,
            )
        });
        let color = cx.new(|cx| {
            ColorPicker::new(
                "Background",
                state.field(|s| s.color.clone(), |s, v| s.color = v),
                window,
                cx,
            )
            .description("Drag in the field or type a hex value.")
        });
        let bars = cx.new(|cx| {
            NumberArray::new(
                "Bar Widths",
                state.field(|s| s.bars.clone(), |s, v| s.bars = v),
                NumberArrayOptions::default()
                    .placeholder("Width in pixels")
                    .constraint(NumberRange::new(0., 400.)),
                window,
                cx,
            )
            .open(true)
        });
        let tags = cx.new(|cx| {
            TextArray::new(
                "Tags",
                state.field(|s| s.tags.clone(), |s, v| s.tags = v),
                TextArrayOptions::default().constraint(TextLimit::default().max_length(16)),
                window,
                cx,
            )
        });
        let config = cx.new(|cx| {
            ObjectEditor::new(
                "Config",
                state.field(|s| s.config.clone(), |s, v| s.config = v),
                ObjectOptions::default().height(px(160.)),
                window,
                cx,
            )
        });

        let _subscriptions = vec![cx.observe(state.entity(), |_, _, cx| cx.notify())];

        Self {
            visible: state.field(|s| s.visible, |s, v| s.visible = v),
            state,
            label,
            caption,
            font_size,
            radius,
            align,
            color,
            bars,
            tags,
            config,
            _subscriptions,
        }
    }

    fn render_preview(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let state = self.state.read(cx).clone();
        let color: Hsla = HexColor::parse(&state.color)
            .map(|color| color.to_rgba().into())
            .unwrap_or(cx.theme().primary);

        v_flex()
            .w_full()
            .gap_3()
            .map(|this| match state.align.as_str() {
                "start" => this.items_start(),
                "end" => this.items_end(),
                _ => this.items_center(),
            })
            .when(!state.visible, |this| {
                this.child(
                    div()
                        .text_color(cx.theme().muted_foreground)
                        .child("The badge is hidden."),
                )
            })
            .when(state.visible, |this| {
                this.child(
                    v_flex()
                        .gap_2()
                        .p(px(state.config.padding as f32))
                        .rounded(px(state.radius as f32))
                        .bg(color)
                        .text_color(white())
                        .when(state.config.shadow, |this| this.shadow_lg())
                        .child(
                            div()
                                .font_semibold()
                                .text_size(px(state.font_size as f32))
                                .child(SharedString::from(state.label.clone())),
                        )
                        .children(
                            state
                                .caption
                                .lines()
                                .map(|line| div().text_sm().child(line.to_string())),
                        )
                        .child(h_flex().gap_1().children(state.tags.iter().map(|tag| {
                            div()
                                .px_2()
                                .rounded_full()
                                .bg(white().opacity(0.2))
                                .text_xs()
                                .child(tag.clone())
                        })))
                        .children(state.bars.iter().map(|width| {
                            div()
                                .h_2()
                                .w(px(*width as f32))
                                .rounded_full()
                                .bg(white().opacity(0.6))
                        }))
                        .when_some(state.config.footer.clone(), |this, footer| {
                            this.child(div().text_xs().opacity(0.8).child(footer))
                        }),
                )
            })
    }
}

impl Render for Gallery {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        Dashboard::new("gallery")
            .title("Badge")
            .description("Edit the badge properties, the preview updates as you type.")
            .control(self.label.clone())
            .control(self.caption.clone())
            .control(self.font_size.clone())
            .control(self.radius.clone())
            .control(
                BoolToggle::new("visible", "Visible", self.visible.clone())
                    .options(ToggleOptions::default().labels("SHOW", "HIDE")),
            )
            .control(self.align.clone())
            .control(self.color.clone())
            .control(self.bars.clone())
            .control(self.tags.clone())
            .control(self.config.clone())
            .component(self.render_preview(cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gpui_controls::{check_json, JsonCheck};

    #[test]
    fn test_config_accepts_null_footer() {
        let check = check_json::<DemoConfig>(r#"{"padding": 8, "shadow": false, "footer": null}"#);
        assert_eq!(
            check,
            JsonCheck::Valid(DemoConfig {
                padding: 8.,
                shadow: false,
                footer: None,
            })
        );
    }

    #[test]
    fn test_default_state_colors_parse() {
        let state = DemoState::default();
        assert!(HexColor::parse(&state.color).is_ok());
        assert!(state.visible);
        assert_eq!(state.align, "center");
    }
}
