//! The crop controller a page talks to.
//!
//! [`Cropper`] holds at most one [`CropSession`] and the [`IconStore`]. It
//! owns the session lifecycle:
//!
//! ```text
//! (no session) --open--> (session) --confirm--> (no session, icon stored)
//!                            |  ^
//!                            |  +-- open (replaces without warning)
//!                            +------cancel--> (no session, store untouched)
//! ```

use crate::config::CropConfig;
use crate::decode::{decode_image, RawImage};
use crate::default_icon::default_icon;
use crate::error::CropError;
use crate::export::EncodedIcon;
use crate::icon_store::IconStore;
use crate::interaction::{DeviceSignal, EventOutcome, InputEvent};
use crate::session::CropSession;

#[derive(Debug)]
pub struct Cropper<S: IconStore> {
    store: S,
    config: CropConfig,
    session: Option<CropSession>,
}

impl<S: IconStore> Cropper<S> {
    /// Create a cropper, installing the generated default icon if the store
    /// is empty.
    pub fn new(store: S, config: CropConfig) -> Result<Self, CropError> {
        Self::with_default_image(store, config, None)
    }

    /// Like [`Cropper::new`], seeding an empty store from `default_image`
    /// (the page's default avatar file) when it decodes.
    pub fn with_default_image(
        mut store: S,
        config: CropConfig,
        default_image: Option<&[u8]>,
    ) -> Result<Self, CropError> {
        config.validate()?;

        if store.get().is_none() {
            let icon = default_icon(default_image, &config)?;
            match store.set(&icon) {
                Ok(()) => log::debug!("installed default icon"),
                Err(e) => log::warn!("could not install default icon: {}", e),
            }
        }

        Ok(Self {
            store,
            config,
            session: None,
        })
    }

    /// Decode `raw` and start a session on it.
    ///
    /// An open session is replaced. If decoding fails nothing changes: the
    /// previous session (if any) stays open and the store is not touched.
    pub fn open(
        &mut self,
        raw: &RawImage,
        signal: &DeviceSignal,
    ) -> Result<&CropSession, CropError> {
        let source = decode_image(raw).inspect_err(|e| {
            log::warn!("rejected {} byte upload ({}): {}", raw.bytes.len(), raw.mime_type, e);
        })?;
        let session = CropSession::start(source, signal, self.config.clone())?;

        if self.session.is_some() {
            log::debug!("replacing open crop session");
        }
        log::info!("crop session opened in {} mode", session.mode().as_str());
        Ok(self.session.insert(session))
    }

    /// Forward an input event to the open session.
    pub fn handle(&mut self, event: InputEvent) -> Result<EventOutcome, CropError> {
        let session = self.session.as_mut().ok_or(CropError::NoSession)?;
        Ok(session.handle(event))
    }

    /// Produce the icon, store it, and end the session.
    ///
    /// A selection below the minimum size is rejected and the session stays
    /// open. If the store write fails the session still ends and the error
    /// carries the icon; see [`Cropper::adopt_icon`].
    pub fn confirm(&mut self) -> Result<EncodedIcon, CropError> {
        let session = self.session.as_ref().ok_or(CropError::NoSession)?;
        let icon = session
            .export()
            .inspect_err(|e| log::warn!("confirm rejected: {}", e))?;
        self.session = None;

        if let Err(source) = self.store.set(&icon) {
            log::warn!("icon store write failed: {}", source);
            return Err(CropError::StoreWrite { icon, source });
        }
        log::info!("icon confirmed ({})", icon.mime_type());
        Ok(icon)
    }

    /// Discard the open session. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        let had_session = self.session.take().is_some();
        if had_session {
            log::info!("crop session cancelled");
        }
        had_session
    }

    /// Write `icon` to the store, e.g. to retry after
    /// [`CropError::StoreWrite`].
    pub fn adopt_icon(&mut self, icon: EncodedIcon) -> Result<(), CropError> {
        self.store
            .set(&icon)
            .map_err(|source| CropError::StoreWrite { icon, source })
    }

    pub fn current_icon(&self) -> Option<EncodedIcon> {
        self.store.get()
    }

    pub fn session(&self) -> Option<&CropSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_png;
    use crate::icon_store::{IconStoreError, MemoryIconStore};
    use crate::interaction::InteractionMode;
    use crate::preview::Point;

    /// Store that refuses writes after the first `allow` of them.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemoryIconStore,
        allow: usize,
        attempts: usize,
    }

    impl IconStore for FlakyStore {
        fn get(&self) -> Option<EncodedIcon> {
            self.inner.get()
        }

        fn set(&mut self, icon: &EncodedIcon) -> Result<(), IconStoreError> {
            self.attempts += 1;
            if self.attempts > self.allow {
                return Err(IconStoreError::WriteFailed("quota exceeded".to_string()));
            }
            self.inner.set(icon)
        }
    }

    fn png(width: u32, height: u32, rgba: [u8; 4]) -> RawImage {
        let pixels = rgba.repeat((width * height) as usize);
        RawImage::new(encode_png(&pixels, width, height).unwrap(), "image/png")
    }

    fn desktop() -> DeviceSignal {
        DeviceSignal::new(Some(1440), None)
    }

    #[test]
    fn test_new_installs_default_icon() {
        let cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default()).unwrap();
        let icon = cropper.current_icon().unwrap();
        assert_eq!(icon.mime_type(), "image/png");
        assert_eq!(cropper.store().writes(), 1);
        assert!(!cropper.is_open());
    }

    #[test]
    fn test_new_keeps_existing_icon() {
        let existing = EncodedIcon::from_bytes("image/png", b"mine");
        let store = MemoryIconStore::with_icon(existing.clone());
        let cropper = Cropper::new(store, CropConfig::default()).unwrap();
        assert_eq!(cropper.current_icon(), Some(existing));
        assert_eq!(cropper.store().writes(), 0);
    }

    #[test]
    fn test_default_image_bytes_are_used() {
        let raw = png(20, 20, [0, 0, 255, 255]);
        let config = CropConfig::default();
        let cropper =
            Cropper::with_default_image(MemoryIconStore::new(), config, Some(&raw.bytes)).unwrap();
        let image = cropper.current_icon().unwrap().to_image().unwrap();
        assert_eq!(&image.pixels[0..4], &[0, 0, 255, 255]);
    }

    #[test]
    fn test_open_and_confirm() {
        let mut cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default()).unwrap();
        let session = cropper.open(&png(800, 600, [0, 200, 0, 255]), &desktop()).unwrap();
        assert_eq!(session.mode(), InteractionMode::Desktop);

        let icon = cropper.confirm().unwrap();
        assert!(!cropper.is_open());
        assert_eq!(cropper.current_icon(), Some(icon.clone()));

        let image = icon.to_image().unwrap();
        assert_eq!((image.width, image.height), (200, 200));
        assert_eq!(&image.pixels[0..4], &[0, 200, 0, 255]);
    }

    #[test]
    fn test_cancel_never_touches_store() {
        let mut cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default()).unwrap();
        let before = cropper.current_icon();
        let writes = cropper.store().writes();

        cropper.open(&png(300, 300, [1, 2, 3, 255]), &desktop()).unwrap();
        cropper.handle(InputEvent::PointerDown(Point::new(0.0, 0.0))).unwrap();
        cropper.handle(InputEvent::PointerMove(Point::new(100.0, 100.0))).unwrap();
        assert!(cropper.cancel());

        assert!(!cropper.is_open());
        assert_eq!(cropper.current_icon(), before);
        assert_eq!(cropper.store().writes(), writes);
        assert!(!cropper.cancel());
    }

    #[test]
    fn test_decode_failure_keeps_previous_session() {
        let mut cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default()).unwrap();
        cropper.open(&png(400, 300, [9, 9, 9, 255]), &desktop()).unwrap();
        cropper.handle(InputEvent::PointerDown(Point::new(10.0, 10.0))).unwrap();
        cropper.handle(InputEvent::PointerMove(Point::new(60.0, 90.0))).unwrap();
        let region = cropper.session().unwrap().region();

        let bad = RawImage::new(b"definitely not pixels".to_vec(), "image/png");
        assert!(matches!(cropper.open(&bad, &desktop()), Err(CropError::Decode(_))));

        let text = RawImage::new(b"hello".to_vec(), "text/plain");
        assert!(matches!(cropper.open(&text, &desktop()), Err(CropError::Decode(_))));

        assert!(cropper.is_open());
        assert_eq!(cropper.session().unwrap().region(), region);
        assert_eq!(cropper.store().writes(), 1);
    }

    #[test]
    fn test_open_replaces_session() {
        let mut cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default()).unwrap();
        cropper.open(&png(800, 600, [0, 0, 0, 255]), &desktop()).unwrap();
        cropper.handle(InputEvent::PointerDown(Point::new(5.0, 5.0))).unwrap();

        let session = cropper.open(&png(200, 100, [0, 0, 0, 255]), &desktop()).unwrap();
        assert_eq!((session.frame().width(), session.frame().height()), (200, 100));
        assert!(!session.is_dragging());
        assert_eq!(session.region().size(), 80.0);
    }

    #[test]
    fn test_degenerate_confirm_keeps_session() {
        let mut cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default()).unwrap();
        cropper.open(&png(400, 300, [5, 5, 5, 255]), &desktop()).unwrap();
        cropper.handle(InputEvent::PointerDown(Point::new(50.0, 50.0))).unwrap();
        cropper.handle(InputEvent::PointerMove(Point::new(53.0, 58.0))).unwrap();
        cropper.handle(InputEvent::PointerUp).unwrap();

        assert!(matches!(
            cropper.confirm(),
            Err(CropError::SelectionTooSmall { .. })
        ));
        assert!(cropper.is_open());
        assert_eq!(cropper.store().writes(), 1);
    }

    #[test]
    fn test_click_then_confirm_uses_previous_selection() {
        let mut cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default()).unwrap();
        cropper.open(&png(400, 300, [40, 80, 120, 255]), &desktop()).unwrap();
        let initial = cropper.session().unwrap().region();

        let down = cropper.handle(InputEvent::PointerDown(Point::new(50.0, 50.0))).unwrap();
        cropper.handle(InputEvent::PointerUp).unwrap();
        assert!(!down.region_changed);
        assert_eq!(cropper.session().unwrap().region(), initial);

        let icon = cropper.confirm().unwrap();
        assert_eq!(cropper.current_icon(), Some(icon));
    }

    #[test]
    fn test_tiny_image_can_be_confirmed() {
        let mut cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default()).unwrap();
        cropper.open(&png(8, 8, [0, 0, 200, 255]), &desktop()).unwrap();
        cropper.handle(InputEvent::PointerDown(Point::new(0.0, 0.0))).unwrap();
        cropper.handle(InputEvent::PointerMove(Point::new(8.0, 8.0))).unwrap();
        cropper.handle(InputEvent::PointerUp).unwrap();

        let image = cropper.confirm().unwrap().to_image().unwrap();
        assert_eq!((image.width, image.height), (200, 200));
        assert_eq!(&image.pixels[0..4], &[0, 0, 200, 255]);
        assert!(!cropper.is_open());
    }

    #[test]
    fn test_events_without_session() {
        let mut cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default()).unwrap();
        assert!(matches!(
            cropper.handle(InputEvent::PointerUp),
            Err(CropError::NoSession)
        ));
        assert!(matches!(cropper.confirm(), Err(CropError::NoSession)));
    }

    #[test]
    fn test_store_failure_returns_icon_for_retry() {
        let store = FlakyStore {
            allow: 1,
            ..Default::default()
        };
        let mut cropper = Cropper::new(store, CropConfig::default()).unwrap();
        let default = cropper.current_icon();
        cropper.open(&png(300, 300, [200, 0, 0, 255]), &desktop()).unwrap();

        let err = cropper.confirm().unwrap_err();
        let icon = err.recovered_icon().cloned().unwrap();
        assert!(matches!(err, CropError::StoreWrite { .. }));
        assert!(!cropper.is_open());
        assert_eq!(cropper.current_icon(), default);

        // Still failing
        assert!(cropper.adopt_icon(icon.clone()).is_err());
        cropper.store_mut().allow = usize::MAX;
        cropper.adopt_icon(icon.clone()).unwrap();
        assert_eq!(cropper.current_icon(), Some(icon));
    }

    #[test]
    fn test_unavailable_store_still_constructs() {
        let store = FlakyStore::default();
        let cropper = Cropper::new(store, CropConfig::default()).unwrap();
        assert!(cropper.current_icon().is_none());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = CropConfig::default();
        config.output_size = 0;
        assert!(matches!(
            Cropper::new(MemoryIconStore::new(), config),
            Err(CropError::Config(_))
        ));
    }
}
