// SPDX-License-Identifier: MPL-2.0
//! Post carousel component: the orchestrator tying paging, visibility,
//! thumbnail resolution and playback sessions together for one post.
//!
//! One `PostCarousel` exists per mounted post. It consumes the hosting
//! feed's visibility signal and scroll offsets, computes the activation
//! predicate exactly once per slide, and routes decoder commands/events
//! between sessions and the host's video backend. The only thing it tells
//! the host is [`Effect::IndexChanged`].

pub mod image_slide;

pub use image_slide::ImageSlide;

use crate::carousel::{self, visibility, CarouselState, DotIndicator, DwellDelay, VisibilityTracker};
use crate::error::Error;
use crate::media::{self, fetch, ImageCache, ImageData, MediaKind, MediaSource};
use crate::playback::{DecoderCommandSender, DecoderEvent, PlaybackSession};
use crate::thumbnail::{self, FrameExtractor, Resolution, StillWidth, ThumbnailStore};
use iced::task;
use iced::Task;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Messages consumed by a post carousel.
#[derive(Debug, Clone)]
pub enum Message {
    /// The hosting feed reported whether this post is visible.
    PostVisibility(bool),
    /// The dwell timer armed with this generation fired.
    DwellElapsed { generation: u64 },
    /// The pager reported a scroll-settle at this offset.
    Scrolled { offset: f32, page_width: f32 },
    /// The user tapped the slide at this index.
    SlideTapped(usize),
    /// Thumbnail resolution finished for the video slide at this index.
    ThumbnailResolved {
        index: usize,
        resolution: Resolution,
    },
    /// The preview image behind a resolved thumbnail URI arrived.
    PreviewFetched {
        index: usize,
        result: Result<ImageData, Error>,
    },
    /// An image slide's fetch finished.
    ImageFetched {
        index: usize,
        result: Result<ImageData, Error>,
    },
    /// The video backend reported an event for the slide at this index.
    Decoder { index: usize, event: DecoderEvent },
}

/// Effects surfaced to the hosting post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    /// The settled page changed; hosts drive page-specific UI off this.
    IndexChanged(usize),
}

/// Shared handles every post carousel in a feed uses.
///
/// Cloning is cheap; all clones observe the same store and cache.
#[derive(Clone)]
pub struct FeedContext {
    /// Process-scoped thumbnail store.
    pub store: ThumbnailStore,
    /// Decoded-image cache shared across posts.
    pub images: Arc<Mutex<ImageCache>>,
    /// Still-frame extraction capability of this target.
    pub extractor: Arc<dyn FrameExtractor>,
    /// Dwell before a visible post counts as centered.
    pub dwell: DwellDelay,
    /// Width of resolved still frames.
    pub still_width: StillWidth,
}

impl FeedContext {
    /// Creates a context with the given extractor and default tuning.
    #[must_use]
    pub fn new(extractor: Arc<dyn FrameExtractor>) -> Self {
        Self {
            store: ThumbnailStore::new(),
            images: Arc::new(Mutex::new(ImageCache::with_defaults())),
            extractor,
            dwell: DwellDelay::default(),
            still_width: StillWidth::default(),
        }
    }

    fn cached_image(&self, uri: &str) -> Option<Arc<ImageData>> {
        self.images.lock().ok().and_then(|mut cache| cache.get(uri))
    }

    fn cache_image(&self, uri: &str, image: &ImageData) {
        if let Ok(mut cache) = self.images.lock() {
            cache.insert(uri.to_string(), image.clone());
        }
    }
}

impl std::fmt::Debug for FeedContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedContext")
            .field("store", &self.store)
            .field("dwell", &self.dwell)
            .field("still_width", &self.still_width)
            .finish_non_exhaustive()
    }
}

/// The media carousel of one mounted post.
pub struct PostCarousel {
    carousel: CarouselState,
    tracker: VisibilityTracker,
    sessions: BTreeMap<usize, PlaybackSession>,
    images: BTreeMap<usize, ImageSlide>,
    previews: BTreeMap<usize, Arc<ImageData>>,
    context: FeedContext,
    dwell_handle: Option<task::Handle>,
}

impl PostCarousel {
    /// Mounts the carousel for a post's media list.
    ///
    /// Thumbnail resolution starts for every video slide and image fetches
    /// start for every image slide not already in the shared cache. No
    /// playback decode is requested here — that takes the activation
    /// predicate.
    #[must_use]
    pub fn new(sources: &[MediaSource], context: FeedContext) -> (Self, Task<Message>) {
        let items = media::build_items(sources);
        let mut sessions = BTreeMap::new();
        let mut images = BTreeMap::new();
        let mut tasks = Vec::new();

        for item in &items {
            let index = item.index;
            match item.kind {
                MediaKind::Video => {
                    let mut session = PlaybackSession::new(item.uri.clone());
                    session.begin_thumbnail_resolution();
                    sessions.insert(index, session);

                    let future = thumbnail::resolve(
                        item.uri.clone(),
                        item.cover_uri.clone(),
                        context.store.clone(),
                        Arc::clone(&context.extractor),
                        context.still_width,
                    );
                    tasks.push(Task::perform(future, move |resolution| {
                        Message::ThumbnailResolved { index, resolution }
                    }));
                }
                MediaKind::Image => {
                    if let Some(cached) = context.cached_image(&item.uri) {
                        images.insert(index, ImageSlide::loaded(item.uri.clone(), cached));
                    } else {
                        images.insert(index, ImageSlide::new(item.uri.clone()));
                        let uri = item.uri.clone();
                        tasks.push(Task::perform(fetch::fetch_image(uri), move |result| {
                            Message::ImageFetched { index, result }
                        }));
                    }
                }
            }
        }

        let component = Self {
            carousel: CarouselState::new(items),
            tracker: VisibilityTracker::new(),
            sessions,
            images,
            previews: BTreeMap::new(),
            context,
            dwell_handle: None,
        };
        (component, Task::batch(tasks))
    }

    /// Attaches the host's video backend channel to a video slide.
    pub fn attach_decoder(&mut self, index: usize, sender: DecoderCommandSender) {
        if let Some(session) = self.sessions.get_mut(&index) {
            session.set_command_sender(sender);
        }
    }

    /// Handle a component message.
    pub fn update(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::PostVisibility(visible) => {
                let effect = self
                    .tracker
                    .handle(visibility::Message::PostVisibility(visible));
                self.apply_visibility_effect(effect)
            }
            Message::DwellElapsed { generation } => {
                let effect = self
                    .tracker
                    .handle(visibility::Message::DwellElapsed { generation });
                self.apply_visibility_effect(effect)
            }
            Message::Scrolled { offset, page_width } => {
                match self.carousel.settle(offset, page_width) {
                    Some(index) => {
                        self.apply_activation();
                        (Effect::IndexChanged(index), Task::none())
                    }
                    None => (Effect::None, Task::none()),
                }
            }
            Message::SlideTapped(index) => {
                if let Some(session) = self.sessions.get_mut(&index) {
                    session.tap();
                }
                (Effect::None, Task::none())
            }
            Message::ThumbnailResolved { index, resolution } => {
                let task = self.handle_resolution(index, resolution);
                (Effect::None, task)
            }
            Message::PreviewFetched { index, result } => {
                match result {
                    Ok(image) => {
                        if let Some(session) = self.sessions.get(&index) {
                            if let Some(uri) = session.preview_uri() {
                                self.context.cache_image(uri, &image);
                            }
                        }
                        self.previews.insert(index, Arc::new(image));
                    }
                    Err(err) => {
                        // The slide keeps its placeholder; nothing escalates
                        eprintln!("Preview fetch failed for slide {index}: {err}");
                    }
                }
                (Effect::None, Task::none())
            }
            Message::ImageFetched { index, result } => {
                if let Some(slide) = self.images.get_mut(&index) {
                    match result {
                        Ok(image) => {
                            self.context.cache_image(slide.uri(), &image);
                            slide.handle_loaded(Ok(Arc::new(image)));
                        }
                        Err(err) => slide.handle_loaded(Err(err)),
                    }
                }
                (Effect::None, Task::none())
            }
            Message::Decoder { index, event } => {
                if let Some(session) = self.sessions.get_mut(&index) {
                    session.handle_decoder_event(event);
                }
                (Effect::None, Task::none())
            }
        }
    }

    /// Releases every held resource. The hosting feed calls this when the
    /// post unbinds; dropping the component has the same effect.
    pub fn shutdown(&mut self) {
        self.abort_dwell();
        for session in self.sessions.values_mut() {
            session.shutdown();
        }
    }

    /// Returns the paging state.
    #[must_use]
    pub fn carousel(&self) -> &CarouselState {
        &self.carousel
    }

    /// Returns the visibility tracker.
    #[must_use]
    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    /// Returns the dot-indicator state for the current page.
    #[must_use]
    pub fn dot_indicator(&self) -> DotIndicator {
        self.carousel.dot_indicator()
    }

    /// Returns the playback session of the video slide at `index`.
    #[must_use]
    pub fn session(&self, index: usize) -> Option<&PlaybackSession> {
        self.sessions.get(&index)
    }

    /// Returns the image slide at `index`.
    #[must_use]
    pub fn image_slide(&self, index: usize) -> Option<&ImageSlide> {
        self.images.get(&index)
    }

    /// Returns the fetched preview image of the video slide at `index`.
    #[must_use]
    pub fn preview(&self, index: usize) -> Option<&Arc<ImageData>> {
        self.previews.get(&index)
    }

    /// Generation of the dwell timer in flight, if one is armed.
    #[must_use]
    pub fn pending_dwell(&self) -> Option<u64> {
        self.tracker.pending_dwell()
    }

    fn apply_visibility_effect(&mut self, effect: visibility::Effect) -> (Effect, Task<Message>) {
        match effect {
            visibility::Effect::ArmDwell { generation } => {
                // Arming replaces any previously armed timer
                self.abort_dwell();
                let delay = self.context.dwell.as_duration();
                let (task, handle) = Task::perform(
                    async move { tokio::time::sleep(delay).await },
                    move |()| Message::DwellElapsed { generation },
                )
                .abortable();
                self.dwell_handle = Some(handle);
                (Effect::None, task)
            }
            visibility::Effect::CancelDwell => {
                self.abort_dwell();
                (Effect::None, Task::none())
            }
            visibility::Effect::Uncentered => {
                self.abort_dwell();
                self.apply_activation();
                (Effect::None, Task::none())
            }
            visibility::Effect::Centered => {
                self.apply_activation();
                (Effect::None, Task::none())
            }
            visibility::Effect::None => (Effect::None, Task::none()),
        }
    }

    /// Recomputes the activation predicate for every video slide.
    ///
    /// Computed in exactly one place so two slides can never disagree
    /// about which one is active.
    fn apply_activation(&mut self) {
        let centered = self.tracker.is_centered();
        for (index, session) in &mut self.sessions {
            let active = carousel::activation(centered, self.carousel.is_active_page(*index));
            session.set_activation(active);
        }
    }

    fn handle_resolution(&mut self, index: usize, resolution: Resolution) -> Task<Message> {
        let Some(session) = self.sessions.get_mut(&index) else {
            return Task::none();
        };
        session.thumbnail_resolved(resolution.clone());

        let Resolution::Resolved { uri } = resolution else {
            return Task::none();
        };

        if let Some(cached) = self.context.cached_image(&uri) {
            self.previews.insert(index, cached);
            return Task::none();
        }
        Task::perform(fetch::fetch_image(uri), move |result| {
            Message::PreviewFetched { index, result }
        })
    }

    fn abort_dwell(&mut self) {
        if let Some(handle) = self.dwell_handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PostCarousel {
    fn drop(&mut self) {
        self.abort_dwell();
        // Sessions release their own decoder resources on drop
    }
}
