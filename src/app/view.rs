use super::canvas::{Backdrop, CursorLayer, Scanlines};
use super::messages::Message;
use super::state::{App, HEADER_TEXT_SIZE, HERO_TITLE_SIZE, PAGE_SCROLL_ID};
use crate::layout::{
    BLOCK_GAP, CARD_GAP, CARD_HEIGHT, CARDS_PER_ROW, CAROUSEL_HEIGHT, FOOTER_HEIGHT,
    INDICATOR_ROW, NAV_HEIGHT, PAGE_PADDING, PANEL_HEIGHT, SECTION_HEADER,
};
use crate::theme::{self, CYAN, MAGENTA, MUTED, NEON_GREEN, SURFACE, TEXT};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::Canvas;
use iced::widget::{
    Column, Row, Space, Stack, button, column, container, image, mouse_area, row, scrollable,
    text,
};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Point, Theme};
use neonfolio_core::decor::scanline_offset;
use neonfolio_core::motion::{HeroPart, hero_frame};
use neonfolio_core::scroll::RevealFrame;
use neonfolio_core::visual_mode::FLASH_DURATION;

const VIEWER_PADDING: f32 = 48.0;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let page = column![self.nav_bar(), self.page()]
            .width(Length::Fill)
            .height(Length::Fill);

        let mut layers: Vec<Element<'_, Message>> = vec![self.backdrop(), page.into()];
        if let Some(popup) = self.popup_layer() {
            layers.push(popup);
        }
        if let Some(viewer) = self.viewer_layer() {
            layers.push(viewer);
        }
        if let Some(loading) = self.loading_layer() {
            layers.push(loading);
        }
        layers.push(self.crt_layer());
        if self.cursor.is_enabled() {
            layers.push(
                Canvas::new(CursorLayer {
                    frame: self.cursor_frame,
                })
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            );
        }

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn backdrop(&self) -> Element<'_, Message> {
        let window = self.layout.window();
        let binary = &self.binary;
        Canvas::new(Backdrop {
            particles: self
                .particles
                .frames(window.width, window.height, self.anim_now),
            binary: binary.text.clone(),
            binary_origin: Point::new(binary.left * window.width, binary.top * window.height),
            binary_opacity: binary.opacity.value_at(self.anim_now),
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn crt_layer(&self) -> Element<'_, Message> {
        let flash = self
            .flash_started
            .map(|start| {
                let elapsed = self.page_now.saturating_sub(start);
                1.0 - (elapsed.as_secs_f32() / FLASH_DURATION.as_secs_f32()).min(1.0)
            })
            .unwrap_or(0.0);
        Canvas::new(Scanlines {
            offset: scanline_offset(self.anim_now) * 100.0,
            alpha: if self.visual_mode.is_crt() { 0.25 } else { 0.06 },
            flash,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn nav_bar(&self) -> Element<'_, Message> {
        let mut links = Row::new().spacing(24).align_y(Vertical::Center);
        for (index, section) in self.config.sections.iter().enumerate() {
            let active = self.nav.active() == Some(index);
            let label = text(section.title.to_uppercase())
                .size(14)
                .font(Font::MONOSPACE)
                .color(if active { NEON_GREEN } else { MUTED });
            links = links.push(interactive(
                button(label)
                    .on_press(Message::NavTo(index))
                    .style(flat_button)
                    .into(),
            ));
        }

        let crt_toggle = interactive(
            button(
                text(self.visual_mode.label())
                    .size(13)
                    .font(Font::MONOSPACE)
                    .color(CYAN),
            )
            .on_press(Message::ToggleVisualMode)
            .style(outline_button)
            .into(),
        );

        container(
            row![
                text(self.config.title.clone())
                    .size(20)
                    .font(Font::MONOSPACE)
                    .color(NEON_GREEN),
                Space::with_width(Length::Fill),
                links,
                crt_toggle,
            ]
            .spacing(24)
            .align_y(Vertical::Center),
        )
        .padding(Padding::from([0.0, PAGE_PADDING]))
        .height(Length::Fixed(NAV_HEIGHT))
        .width(Length::Fill)
        .align_y(Vertical::Center)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(theme::with_alpha(SURFACE, 0.85))),
            border: Border {
                color: theme::with_alpha(NEON_GREEN, 0.3),
                width: 1.0,
                radius: 0.0.into(),
            },
            ..container::Style::default()
        })
        .into()
    }

    fn page(&self) -> Element<'_, Message> {
        let mut content = Column::new()
            .width(Length::Fill)
            .push(self.hero())
            .push(Space::with_height(BLOCK_GAP))
            .push(self.carousel())
            .push(Space::with_height(BLOCK_GAP))
            .push(self.panel());

        let mut card = 0;
        for (section_index, section) in self.config.sections.iter().enumerate() {
            content = content
                .push(Space::with_height(BLOCK_GAP))
                .push(self.section_header(section_index, &section.title));
            let mut rows = Column::new().spacing(CARD_GAP);
            for chunk in section.cards.chunks(CARDS_PER_ROW) {
                let mut line = Row::new().spacing(CARD_GAP);
                for entry in chunk {
                    line = line.push(self.card(card, &entry.title, &entry.tag));
                    card += 1;
                }
                rows = rows.push(line);
            }
            content = content.push(container(rows).padding(Padding::from([0.0, PAGE_PADDING])));
        }

        content = content
            .push(Space::with_height(BLOCK_GAP))
            .push(self.footer());

        scrollable(content)
            .id(PAGE_SCROLL_ID.clone())
            .on_scroll(|viewport| Message::Scrolled {
                offset_y: viewport.absolute_offset().y,
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn hero_part(&self, part: HeroPart) -> (f32, f32) {
        if self.reduced_motion() {
            (1.0, 0.0)
        } else {
            hero_frame(&self.hero, part, self.page_now)
        }
    }

    fn hero(&self) -> Element<'_, Message> {
        let (title_opacity, title_rise) = self.hero_part(HeroPart::Title);
        let (parallax_y, parallax_opacity) = if self.reduced_motion() {
            (0.0, 1.0)
        } else {
            self.parallax.frame(self.page_now)
        };
        let (jitter_x, jitter_y) = self.glitch.jitter(0, self.page_now);
        let title_color = if self.glitch.is_glitching(0, self.page_now) {
            MAGENTA
        } else {
            NEON_GREEN
        };
        let title = container(
            text(self.config.title.clone())
                .size(HERO_TITLE_SIZE)
                .font(Font::MONOSPACE)
                .color(theme::with_alpha(
                    title_color,
                    title_opacity * parallax_opacity,
                )),
        )
        .padding(offset_padding(jitter_x, title_rise + parallax_y + jitter_y));

        let (subtitle_opacity, subtitle_rise) = self.hero_part(HeroPart::Subtitle);
        let subtitle = container(
            text(self.config.subtitle.clone())
                .size(20)
                .color(theme::with_alpha(TEXT, subtitle_opacity)),
        )
        .padding(offset_padding(0.0, subtitle_rise));

        let (decor_opacity, decor_rise) = self.hero_part(HeroPart::Decor);
        let terminal = if self.reduced_motion() {
            self.terminal.text()
        } else {
            self.terminal.visible_text(self.page_now)
        };
        let hud_alpha = self.hud.value_at(self.anim_now) * decor_opacity;
        let decor = container(
            container(
                text(terminal.to_string())
                    .size(16)
                    .font(Font::MONOSPACE)
                    .color(theme::with_alpha(NEON_GREEN, decor_opacity)),
            )
            .padding(16)
            .width(Length::Fixed(520.0))
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(theme::with_alpha(SURFACE, 0.6))),
                border: Border {
                    color: theme::with_alpha(CYAN, hud_alpha),
                    width: 1.0,
                    radius: 2.0.into(),
                },
                ..container::Style::default()
            }),
        )
        .padding(offset_padding(0.0, decor_rise));

        let (indicator_opacity, _) = self.hero_part(HeroPart::ScrollIndicator);
        let indicator = text("SCROLL \u{2193}")
            .size(12)
            .font(Font::MONOSPACE)
            .color(theme::with_alpha(MUTED, indicator_opacity));

        container(
            column![title, subtitle, decor, indicator]
                .spacing(24)
                .align_x(Horizontal::Center),
        )
        .width(Length::Fill)
        .height(Length::Fixed(self.layout.hero_height()))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
    }

    fn carousel(&self) -> Element<'_, Message> {
        let offset = self.slides.offset.value_at(self.page_now);
        let width = self.layout.window().width - 2.0 * PAGE_PADDING;
        let lower = offset.floor().max(0.0) as usize;
        let blend = offset - offset.floor();

        let mut strip: Vec<Element<'_, Message>> = Vec::new();
        for (index, opacity) in [(lower, 1.0 - blend), (lower + 1, blend)] {
            if opacity <= 0.0 {
                continue;
            }
            let Some(handle) = self.slide_paths.get(index).and_then(|p| self.images.handle(p))
            else {
                continue;
            };
            let title = self
                .config
                .slides
                .get(index)
                .map(|slide| slide.title.clone())
                .unwrap_or_default();
            strip.push(
                column![
                    image(handle)
                        .width(Length::Fixed(width))
                        .height(Length::Fixed(CAROUSEL_HEIGHT - 32.0))
                        .opacity(opacity),
                    text(title)
                        .size(16)
                        .font(Font::MONOSPACE)
                        .color(theme::with_alpha(TEXT, opacity)),
                ]
                .spacing(8)
                .into(),
            );
        }
        let slides = container(Stack::with_children(strip))
            .width(Length::Fill)
            .height(Length::Fixed(CAROUSEL_HEIGHT))
            .clip(true);

        let mut indicators = Row::new().spacing(8).align_y(Vertical::Center);
        for (index, fill) in self.slides.fills.iter().enumerate() {
            indicators = indicators.push(interactive(
                mouse_area(progress_indicator(
                    self.carousel.indicator_width(index),
                    *fill,
                    index == self.carousel.current_index(),
                ))
                .on_press(Message::CarouselSelect(index))
                .into(),
            ));
        }
        let controls = row![
            interactive(
                button(text("<").font(Font::MONOSPACE).color(NEON_GREEN))
                    .on_press(Message::CarouselPrevious)
                    .style(outline_button)
                    .into()
            ),
            indicators,
            interactive(
                button(text(">").font(Font::MONOSPACE).color(NEON_GREEN))
                    .on_press(Message::CarouselNext)
                    .style(outline_button)
                    .into()
            ),
        ]
        .spacing(16)
        .align_y(Vertical::Center);

        container(
            column![
                slides,
                container(controls)
                    .height(Length::Fixed(INDICATOR_ROW))
                    .align_y(Vertical::Bottom),
            ]
            .align_x(Horizontal::Center),
        )
        .padding(Padding::from([0.0, PAGE_PADDING]))
        .width(Length::Fill)
        .into()
    }

    fn panel(&self) -> Element<'_, Message> {
        let frame = self.reveal.frame(self.reveal_ids.panel, self.page_now);
        let hud_alpha = self.hud.value_at(self.anim_now);
        let card_count = self.card_paths.len();
        let body = column![
            text("// SYSTEM STATUS")
                .size(14)
                .font(Font::MONOSPACE)
                .color(theme::with_alpha(CYAN, frame.opacity)),
            text(format!(
                "{} sections / {} works / {} slides",
                self.config.sections.len(),
                card_count,
                self.slide_paths.len()
            ))
            .size(28)
            .color(theme::with_alpha(TEXT, frame.opacity)),
        ]
        .spacing(12);

        let width = self.layout.window().width - 2.0 * PAGE_PADDING;
        container(
            container(body)
                .padding(24)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(move |_theme: &Theme| container::Style {
                    background: Some(Background::Color(theme::with_alpha(
                        SURFACE,
                        0.7 * frame.opacity,
                    ))),
                    border: Border {
                        color: theme::with_alpha(NEON_GREEN, hud_alpha * frame.opacity),
                        width: 1.0,
                        radius: 2.0.into(),
                    },
                    ..container::Style::default()
                }),
        )
        .padding(widen(reveal_padding(frame, width, PANEL_HEIGHT), PAGE_PADDING))
        .width(Length::Fill)
        .height(Length::Fixed(PANEL_HEIGHT))
        .into()
    }

    fn section_header(&self, section: usize, title: &str) -> Element<'_, Message> {
        let glitch = section + 1;
        let frame = self
            .reveal_ids
            .headers
            .get(section)
            .map(|id| self.reveal.frame(*id, self.page_now))
            .unwrap_or(RevealFrame {
                opacity: 1.0,
                dx: 0.0,
                dy: 0.0,
                scale: 1.0,
            });
        let (jitter_x, jitter_y) = self.glitch.jitter(glitch, self.page_now);
        let color = if self.glitch.is_glitching(glitch, self.page_now) {
            MAGENTA
        } else {
            NEON_GREEN
        };
        container(
            text(format!("> {}", title.to_uppercase()))
                .size(HEADER_TEXT_SIZE)
                .font(Font::MONOSPACE)
                .color(theme::with_alpha(color, frame.opacity)),
        )
        .padding(widen(
            offset_padding(frame.dx + jitter_x, frame.dy + jitter_y),
            PAGE_PADDING,
        ))
        .width(Length::Fill)
        .height(Length::Fixed(SECTION_HEADER))
        .align_y(Vertical::Center)
        .into()
    }

    fn card(&self, card: usize, title: &str, tag: &str) -> Element<'_, Message> {
        let frame = self
            .reveal_ids
            .cards
            .get(card)
            .map(|id| self.reveal.frame(*id, self.page_now))
            .unwrap_or(RevealFrame {
                opacity: 1.0,
                dx: 0.0,
                dy: 0.0,
                scale: 1.0,
            });
        let opacity = frame.opacity * self.dimmer.opacity(card, self.page_now);
        let hovered = self.popup.card == Some(card);
        let width = self.layout.card_width();

        let mut body = Column::new().spacing(8);
        if let Some(handle) = self.card_path(card).and_then(|path| self.images.handle(path)) {
            body = body.push(
                image(handle)
                    .width(Length::Fill)
                    .height(Length::Fixed(CARD_HEIGHT - 72.0))
                    .opacity(opacity),
            );
        }
        body = body.push(
            text(title.to_string())
                .size(16)
                .color(theme::with_alpha(TEXT, opacity)),
        );
        if !tag.is_empty() {
            body = body.push(
                text(tag.to_uppercase())
                    .size(11)
                    .font(Font::MONOSPACE)
                    .color(theme::with_alpha(CYAN, opacity)),
            );
        }

        let tile = container(body)
            .padding(12)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(theme::with_alpha(SURFACE, opacity))),
                border: Border {
                    color: theme::with_alpha(
                        if hovered { CYAN } else { NEON_GREEN },
                        if hovered { opacity } else { 0.3 * opacity },
                    ),
                    width: 1.0,
                    radius: 2.0.into(),
                },
                ..container::Style::default()
            });

        mouse_area(
            container(tile)
                .padding(offset_padding(frame.dx, frame.dy))
                .width(Length::Fixed(width))
                .height(Length::Fixed(CARD_HEIGHT)),
        )
        .on_enter(Message::CardEntered(card))
        .on_exit(Message::CardExited(card))
        .on_press(Message::CardPressed(card))
        .into()
    }

    fn footer(&self) -> Element<'_, Message> {
        container(
            text(format!("{} // {}", self.config.title, self.config.subtitle))
                .size(12)
                .font(Font::MONOSPACE)
                .color(MUTED),
        )
        .width(Length::Fill)
        .height(Length::Fixed(FOOTER_HEIGHT))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
    }

    fn popup_layer(&self) -> Option<Element<'_, Message>> {
        let card = self.popup.card?;
        let placement = self.popup.placement?;
        let opacity = self.popup.opacity.value_at(self.page_now);
        if opacity <= 0.0 {
            return None;
        }
        let path = self.card_path(card)?;
        let handle = self.images.handle(path)?;
        let size = self.images.preview_size(path);
        let scale = self.popup.scale.value_at(self.page_now);
        let (width, height) = (size.width * scale, size.height * scale);

        let panel = container(
            image(handle)
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .opacity(opacity),
        )
        .style(move |_theme: &Theme| container::Style {
            border: Border {
                color: theme::with_alpha(CYAN, opacity),
                width: 2.0,
                radius: 2.0.into(),
            },
            ..container::Style::default()
        });

        // Scale around the centre of the placed box.
        let inset_x = size.width * (1.0 - scale) / 2.0;
        let inset_y = size.height * (1.0 - scale) / 2.0;
        Some(
            container(
                mouse_area(panel)
                    .on_enter(Message::PanelEntered)
                    .on_exit(Message::PanelExited),
            )
            .padding(Padding {
                top: (placement.top + inset_y).max(0.0),
                left: (placement.left + inset_x).max(0.0),
                right: 0.0,
                bottom: 0.0,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        )
    }

    fn viewer_layer(&self) -> Option<Element<'_, Message>> {
        let path = self.viewer.showing()?;
        let window = self.layout.window();
        let content: Element<'_, Message> = match self.images.handle(path) {
            Some(handle) => image(handle)
                .width(Length::Fixed((window.width - 2.0 * VIEWER_PADDING).max(0.0)))
                .height(Length::Fixed((window.height - 3.0 * VIEWER_PADDING).max(0.0)))
                .into(),
            None => text(path.display().to_string()).color(TEXT).into(),
        };

        let close = interactive(
            button(text("CLOSE [ESC]").size(13).font(Font::MONOSPACE).color(NEON_GREEN))
                .on_press(Message::ViewerClosePressed)
                .style(outline_button)
                .into(),
        );

        Some(
            mouse_area(
                container(
                    column![
                        container(close).width(Length::Fill).align_x(Horizontal::Right),
                        mouse_area(content).on_press(Message::ViewerContentPressed),
                    ]
                    .spacing(8)
                    .align_x(Horizontal::Center),
                )
                .padding(VIEWER_PADDING / 2.0)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center)
                .style(|_theme: &Theme| container::Style {
                    background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.92))),
                    ..container::Style::default()
                }),
            )
            .on_press(Message::ViewerBackdropPressed)
            .into(),
        )
    }

    fn loading_layer(&self) -> Option<Element<'_, Message>> {
        let opacity = self.loading_screen.opacity(self.page_now);
        if opacity <= 0.0 {
            return None;
        }
        let screen = &self.loading_screen;
        let bar = progress_indicator(320.0, screen.percent / 100.0, true);
        Some(
            container(
                column![
                    text(self.config.title.clone())
                        .size(40)
                        .font(Font::MONOSPACE)
                        .color(theme::with_alpha(NEON_GREEN, opacity)),
                    bar,
                    text(format!("{}%", screen.label))
                        .size(14)
                        .font(Font::MONOSPACE)
                        .color(theme::with_alpha(CYAN, opacity)),
                    text(screen.message)
                        .size(12)
                        .font(Font::MONOSPACE)
                        .color(theme::with_alpha(MUTED, opacity)),
                ]
                .spacing(16)
                .align_x(Horizontal::Center),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(theme::with_alpha(
                    theme::BACKGROUND,
                    opacity,
                ))),
                ..container::Style::default()
            })
            .into(),
        )
    }
}

/// Report hover over buttons and links to the decorative cursor.
fn interactive(content: Element<'_, Message>) -> Element<'_, Message> {
    mouse_area(content)
        .on_enter(Message::InteractiveEntered)
        .on_exit(Message::InteractiveExited)
        .into()
}

fn progress_indicator<'a>(width: f32, fill: f32, active: bool) -> Element<'a, Message> {
    let fill = fill.clamp(0.0, 1.0);
    let track = if active {
        theme::with_alpha(NEON_GREEN, 0.25)
    } else {
        theme::with_alpha(MUTED, 0.4)
    };
    let filled = container(Space::new(Length::Fixed(width * fill), Length::Fixed(4.0))).style(
        |_theme: &Theme| container::Style {
            background: Some(Background::Color(NEON_GREEN)),
            ..container::Style::default()
        },
    );
    container(row![filled, Space::with_width(Length::Fill)])
        .width(Length::Fixed(width))
        .height(Length::Fixed(4.0))
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(track)),
            ..container::Style::default()
        })
        .into()
}

/// Shift content by `(dx, dy)` inside a fixed-size box.
fn offset_padding(dx: f32, dy: f32) -> Padding {
    Padding {
        top: dy.max(0.0),
        bottom: (-dy).max(0.0),
        left: dx.max(0.0),
        right: (-dx).max(0.0),
    }
}

fn widen(padding: Padding, horizontal: f32) -> Padding {
    Padding {
        left: padding.left + horizontal,
        right: padding.right + horizontal,
        ..padding
    }
}

/// Entrance offset plus a symmetric inset standing in for scale.
fn reveal_padding(frame: RevealFrame, width: f32, height: f32) -> Padding {
    let inset_x = width * (1.0 - frame.scale) / 2.0;
    let inset_y = height * (1.0 - frame.scale) / 2.0;
    let offset = offset_padding(frame.dx, frame.dy);
    Padding {
        top: offset.top + inset_y,
        bottom: offset.bottom + inset_y,
        left: offset.left + inset_x,
        right: offset.right + inset_x,
    }
}

fn flat_button(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: TEXT,
        ..button::Style::default()
    }
}

fn outline_button(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered | button::Status::Pressed => 1.0,
        _ => 0.5,
    };
    button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: CYAN,
        border: Border {
            color: theme::with_alpha(CYAN, alpha),
            width: 1.0,
            radius: 2.0.into(),
        },
        ..button::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_padding_keeps_the_box_size() {
        let up = offset_padding(-10.0, 30.0);
        assert_eq!(up.left + up.right, 10.0);
        assert_eq!(up.top + up.bottom, 30.0);
        assert_eq!(up.right, 10.0);
        assert_eq!(up.top, 30.0);
    }

    #[test]
    fn reveal_padding_insets_for_scale() {
        let frame = RevealFrame {
            opacity: 0.0,
            dx: 0.0,
            dy: 0.0,
            scale: 0.9,
        };
        let padding = reveal_padding(frame, 200.0, 100.0);
        assert!((padding.left - 10.0).abs() < 1e-4);
        assert!((padding.top - 5.0).abs() < 1e-4);
    }
}
