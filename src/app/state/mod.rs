mod constants;
mod ui;

use crate::assets::ImageCache;
use crate::cache::PrefsFile;
use crate::config::{AppConfig, SectionEntry};
use crate::layout::PageLayout;
use crate::theme;
use iced::{Task, Theme};
use neonfolio_core::carousel::{Carousel, CarouselTimer};
use neonfolio_core::cursor::{CursorFollower, CursorFrame};
use neonfolio_core::decor::{BinaryBackdrop, PARTICLE_COUNT, ParticleField, hud_pulse};
use neonfolio_core::dimming::SiblingDimmer;
use neonfolio_core::loading::{LoadingSequence, LoadingTimer};
use neonfolio_core::motion::{HeroPart, MotionClock, Oscillator, Timeline, hero_timeline};
use neonfolio_core::preview::{PreviewPositioner, PreviewTimer};
use neonfolio_core::scroll::{
    NavHighlighter, ParallaxScrub, RevealKind, RevealTracker, SmoothScroll,
};
use neonfolio_core::text_fx::{GlitchScheduler, GlitchTimer, Typewriter};
use neonfolio_core::timers::Debouncer;
use neonfolio_core::viewer::FullscreenViewer;
use neonfolio_core::visual_mode::{VisualMode, VisualModeTimer};
use neonfolio_core::{Point, Size, TimerQueue};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use ui::{LoadingScreen, Popup, RevealIds, SlideShow};

/// Every timer the page schedules, tagged by owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppTimer {
    Carousel(CarouselTimer),
    Preview(PreviewTimer),
    Loading(LoadingTimer),
    Glitch(GlitchTimer),
    VisualMode(VisualModeTimer),
    Resize,
}

impl From<CarouselTimer> for AppTimer {
    fn from(timer: CarouselTimer) -> Self {
        AppTimer::Carousel(timer)
    }
}

impl From<PreviewTimer> for AppTimer {
    fn from(timer: PreviewTimer) -> Self {
        AppTimer::Preview(timer)
    }
}

impl From<LoadingTimer> for AppTimer {
    fn from(timer: LoadingTimer) -> Self {
        AppTimer::Loading(timer)
    }
}

impl From<GlitchTimer> for AppTimer {
    fn from(timer: GlitchTimer) -> Self {
        AppTimer::Glitch(timer)
    }
}

impl From<VisualModeTimer> for AppTimer {
    fn from(timer: VisualModeTimer) -> Self {
        AppTimer::VisualMode(timer)
    }
}

/// Page state: the core components plus what the view needs to draw them.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) started_at: Instant,
    /// Wall time since start; drives timers and one-shot tweens.
    pub(super) page_now: Duration,
    /// Animation time; drives the decorative loops.
    pub(super) anim_now: Duration,
    pub(super) clock: MotionClock,
    pub(super) timers: TimerQueue<AppTimer>,
    pub(super) rng: StdRng,
    pub(super) prefs: PrefsFile,
    pub(super) layout: PageLayout,
    pub(super) images: ImageCache,
    pub(super) slide_paths: Vec<PathBuf>,
    pub(super) card_paths: Vec<PathBuf>,
    pub(super) loading: LoadingSequence,
    pub(super) loading_screen: LoadingScreen,
    pub(super) hero: Timeline<HeroPart>,
    pub(super) carousel: Carousel,
    pub(super) slides: SlideShow,
    pub(super) preview: PreviewPositioner,
    pub(super) popup: Popup,
    pub(super) cursor: CursorFollower,
    pub(super) cursor_frame: CursorFrame,
    pub(super) pointer: Point,
    pub(super) particles: ParticleField,
    pub(super) binary: BinaryBackdrop,
    pub(super) hud: Oscillator,
    pub(super) glitch: GlitchScheduler,
    pub(super) terminal: Typewriter,
    pub(super) reveal: RevealTracker,
    pub(super) reveal_ids: RevealIds,
    pub(super) parallax: ParallaxScrub,
    pub(super) nav: NavHighlighter,
    pub(super) smooth_scroll: SmoothScroll,
    pub(super) dimmer: SiblingDimmer,
    pub(super) viewer: FullscreenViewer<PathBuf>,
    /// Offset held while the viewer is open.
    pub(super) scroll_lock: Option<f32>,
    pub(super) visual_mode: VisualMode,
    pub(super) flash_started: Option<Duration>,
    pub(super) theme: Theme,
    pub(super) resize: Debouncer,
}

impl App {
    pub(super) fn bootstrap(config: AppConfig, prefs_path: PathBuf) -> (App, Task<Message>) {
        let mut rng = StdRng::from_os_rng();
        let prefs = PrefsFile::open(prefs_path);
        let visual_mode = VisualMode::load(&prefs);
        let window = Size::new(config.window_width, config.window_height);
        let layout = PageLayout::new(window, &config.sections);

        let slide_paths: Vec<PathBuf> = config
            .slides
            .iter()
            .map(|slide| config.assets_dir.join(&slide.image))
            .collect();
        let card_paths: Vec<PathBuf> = config
            .cards()
            .map(|(_, card)| config.assets_dir.join(&card.image))
            .collect();
        let card_sections: Vec<usize> = config.cards().map(|(section, _)| section).collect();
        let images = ImageCache::preload(
            slide_paths
                .iter()
                .chain(card_paths.iter())
                .map(PathBuf::as_path),
        );

        let mut reveal = RevealTracker::new();
        reveal.set_instant(config.motion.reduced_motion);
        let reveal_ids = register_reveals(&mut reveal, &layout, &config.sections);
        let loading = LoadingSequence::new(config.loading);
        let loading_screen = LoadingScreen::new(loading.message());
        let mut cursor = CursorFollower::new(config.cursor);
        let cursor_frame = cursor.frame(Duration::ZERO);

        let mut app = App {
            started_at: Instant::now(),
            page_now: Duration::ZERO,
            anim_now: Duration::ZERO,
            clock: MotionClock::from_config(&config.motion),
            timers: TimerQueue::new(),
            particles: ParticleField::generate(PARTICLE_COUNT, &mut rng),
            binary: BinaryBackdrop::generate(&mut rng),
            hud: hud_pulse(),
            rng,
            prefs,
            nav: NavHighlighter::new(layout.section_spans()),
            parallax: ParallaxScrub::new(0.0, layout.hero_height()),
            layout,
            images,
            slide_paths,
            card_paths,
            loading,
            loading_screen,
            hero: hero_timeline(),
            carousel: Carousel::new(config.slides.len(), config.carousel),
            slides: SlideShow::new(config.slides.len()),
            preview: PreviewPositioner::new(config.preview),
            popup: Popup::new(),
            cursor,
            cursor_frame,
            pointer: Point::ORIGIN,
            glitch: GlitchScheduler::new(1 + config.sections.len()),
            terminal: Typewriter::new(config.terminal_text.clone()),
            reveal,
            reveal_ids,
            smooth_scroll: SmoothScroll::new(),
            dimmer: SiblingDimmer::new(card_sections),
            viewer: FullscreenViewer::new(),
            scroll_lock: None,
            theme: theme::theme(visual_mode.is_crt()),
            visual_mode,
            flash_started: None,
            resize: Debouncer::new(),
            config,
        };

        let task = app.start();
        tracing::info!(
            slides = app.slide_paths.len(),
            cards = app.card_paths.len(),
            images = app.images.len(),
            crt = app.visual_mode.is_crt(),
            reduced_motion = app.config.motion.reduced_motion,
            "Initialized page state"
        );
        (app, task)
    }

    pub(super) fn reduced_motion(&self) -> bool {
        self.config.motion.reduced_motion
    }

    pub(super) fn card_path(&self, card: usize) -> Option<&PathBuf> {
        self.card_paths.get(card)
    }

    /// Move every layout-derived trigger to the current block positions.
    pub(super) fn refresh_triggers(&mut self) {
        self.nav.set_spans(self.layout.section_spans());
        self.parallax.set_hero(0.0, self.layout.hero_height());

        self.reveal.set_top(self.reveal_ids.panel, self.layout.panel_top());
        for (id, block) in self.reveal_ids.headers.iter().zip(self.layout.sections()) {
            self.reveal.set_top(*id, block.top);
        }
        for (card, id) in self.reveal_ids.cards.iter().enumerate() {
            if let Some(rect) = self.layout.card_page_rect(card) {
                self.reveal.set_top(*id, rect.top);
            }
        }
        tracing::debug!(
            width = self.layout.window().width,
            height = self.layout.window().height,
            content_height = self.layout.content_height(),
            "Refreshed layout triggers"
        );
    }
}

fn register_reveals(
    reveal: &mut RevealTracker,
    layout: &PageLayout,
    sections: &[SectionEntry],
) -> RevealIds {
    let panel = reveal.add(RevealKind::Panel, layout.panel_top());
    let headers = layout
        .sections()
        .iter()
        .map(|block| reveal.add(RevealKind::Header, block.top))
        .collect();
    let mut cards = Vec::new();
    let mut card = 0;
    for section in sections {
        for index in 0..section.cards.len() {
            let top = layout
                .card_page_rect(card)
                .map(|rect| rect.top)
                .unwrap_or(f32::MAX);
            cards.push(reveal.add(RevealKind::Card { index }, top));
            card += 1;
        }
    }
    RevealIds {
        panel,
        headers,
        cards,
    }
}
