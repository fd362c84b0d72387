//! Local previews for homework file inputs.
//!
//! Markup: `<input type="file" class="file-upload-input" accept="image/*"
//! data-preview="preview-box">` plus an element with id `preview-box`.
//! Selecting files renders thumbnails (images) or inline players (audio) into
//! that element. Nothing is uploaded here; the surrounding form does that.
//!
//! Each change event starts a new generation in a [`PreviewSession`]: reads
//! still pending from the previous selection are aborted and their object
//! URLs revoked before the container is cleared, so a slow read can never
//! land in a newer preview. The session only talks to a [`PreviewTarget`]
//! and [`SelectedFile`]s, which the browser build implements for the
//! container element and `web_sys::File`.
//!
//! Files the server will refuse (extension or size, see [`UploadPolicy`])
//! are still previewed, but a warning toast names the problem.

#[cfg(test)]
#[path = "file_preview_test.rs"]
mod file_preview_test;

use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::config::UiConfig;
use crate::util::task::TaskSet;

pub const INPUT_SELECTOR: &str = ".file-upload-input";
pub const PREVIEW_TARGET_ATTR: &str = "data-preview";
pub const IMAGE_PREVIEW_CLASS: &str = "image-preview mb-2 me-2";
pub const IMAGE_PREVIEW_MAX_HEIGHT: &str = "150px";
pub const AUDIO_PLAYER_CLASS: &str = "audio-player mb-2";

/// How a file input's selection is previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Audio,
}

impl PreviewKind {
    /// Derive the kind from the input's `accept` filter. Images win when the
    /// filter names both.
    pub fn from_accept(accept: &str) -> Option<Self> {
        if accept.contains("image") {
            Some(Self::Image)
        } else if accept.contains("audio") {
            Some(Self::Audio)
        } else {
            None
        }
    }
}

/// Why the server would reject a selected file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadIssue {
    #[error("文件 {name} 的格式不受支持")]
    UnsupportedExtension { name: String },
    #[error("文件 {name} 超过大小限制（{max_mb} MB）")]
    TooLarge { name: String, size: u64, max_mb: u64 },
}

/// Client-side mirror of the server's upload rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub image_extensions: Vec<String>,
    pub audio_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

impl UploadPolicy {
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            max_bytes: config.max_upload_bytes,
            image_extensions: config.image_extensions.clone(),
            audio_extensions: config.audio_extensions.clone(),
        }
    }

    /// Check one file against the rules for `kind`.
    ///
    /// # Errors
    ///
    /// Returns the first rule the file breaks.
    pub fn check(&self, kind: PreviewKind, name: &str, size: u64) -> Result<(), UploadIssue> {
        let allowed = match kind {
            PreviewKind::Image => &self.image_extensions,
            PreviewKind::Audio => &self.audio_extensions,
        };
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !allowed.iter().any(|a| *a == extension) {
            return Err(UploadIssue::UnsupportedExtension { name: name.to_owned() });
        }
        if size > self.max_bytes {
            return Err(UploadIssue::TooLarge {
                name: name.to_owned(),
                size,
                max_mb: self.max_bytes / (1024 * 1024),
            });
        }
        Ok(())
    }
}

/// Where a selection is previewed.
pub trait PreviewTarget {
    /// Remove everything a previous selection rendered.
    fn clear(&self);
    fn append_thumbnail(&self, data_url: &str);
    fn append_audio(&self, src: &str, mime: &str);
    /// Revoke an object URL handed out by [`SelectedFile::object_url`].
    fn release_url(&self, url: &str);
}

/// One file from the input's selection.
#[allow(async_fn_in_trait)]
pub trait SelectedFile {
    fn file_name(&self) -> String;
    fn byte_size(&self) -> u64;
    fn mime(&self) -> String;

    /// Read the file as a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns a description of the read failure.
    async fn read_data_url(&self) -> Result<String, String>;

    /// A blob URL for streaming playback, if one can be created.
    fn object_url(&self) -> Option<String>;
}

/// Work started by one selection.
pub struct Selection {
    /// Pending thumbnail reads. Each appends to the target when it completes,
    /// unless a newer selection aborted it first.
    pub reads: Vec<LocalBoxFuture<'static, ()>>,
    pub issues: Vec<UploadIssue>,
}

/// Preview state of a single file input.
pub struct PreviewSession<T> {
    tasks: TaskSet,
    object_urls: Vec<String>,
    target: Rc<T>,
}

impl<T: PreviewTarget + 'static> PreviewSession<T> {
    pub fn new(target: T) -> Self {
        Self { tasks: TaskSet::new(), object_urls: Vec::new(), target: Rc::new(target) }
    }

    /// Replace the preview with `files`.
    ///
    /// Reads from the previous selection are aborted and its object URLs
    /// released before the target is cleared.
    pub fn select<F: SelectedFile + 'static>(
        &mut self,
        kind: Option<PreviewKind>,
        files: Vec<F>,
        policy: &UploadPolicy,
    ) -> Selection {
        self.tasks.restart();
        for url in self.object_urls.drain(..) {
            self.target.release_url(&url);
        }
        self.target.clear();

        let mut selection = Selection { reads: Vec::new(), issues: Vec::new() };
        let Some(kind) = kind else {
            return selection;
        };

        for file in files {
            if let Err(issue) = policy.check(kind, &file.file_name(), file.byte_size()) {
                selection.issues.push(issue);
            }
            match kind {
                PreviewKind::Image => {
                    let target = Rc::clone(&self.target);
                    let read = self.tasks.track(async move { file.read_data_url().await });
                    selection.reads.push(
                        async move {
                            match read.await {
                                Ok(Ok(data_url)) => target.append_thumbnail(&data_url),
                                Ok(Err(err)) => log::warn!("file read failed: {err}"),
                                // Superseded by a newer selection.
                                Err(_aborted) => {}
                            }
                        }
                        .boxed_local(),
                    );
                }
                PreviewKind::Audio => match file.object_url() {
                    Some(url) => {
                        self.target.append_audio(&url, &file.mime());
                        self.object_urls.push(url);
                    }
                    None => log::debug!("no object url for {}", file.file_name()),
                },
            }
        }
        selection
    }

    /// Object URLs held for the current selection.
    pub fn object_urls(&self) -> &[String] {
        &self.object_urls
    }
}

/// Wire change handlers on every preview-enabled file input.
pub fn init_file_upload_previews(config: &UiConfig) {
    #[cfg(feature = "hydrate")]
    browser::init(config);
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;

    use futures::channel::oneshot;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{
        Document, Element, File, FileReader, HtmlAudioElement, HtmlImageElement, HtmlInputElement,
        HtmlSourceElement, Url,
    };

    use super::*;
    use crate::components::notification::{Notification, Severity};
    use crate::util::dom;

    const FILE_READER_LOADING: u16 = 1;

    /// The preview container of one input.
    struct DomTarget {
        doc: Document,
        container: Element,
    }

    impl PreviewTarget for DomTarget {
        fn clear(&self) {
            self.container.set_inner_html("");
        }

        fn append_thumbnail(&self, data_url: &str) {
            let img = self
                .doc
                .create_element("img")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
            let Some(img) = img else {
                return;
            };
            img.set_src(data_url);
            img.set_class_name(IMAGE_PREVIEW_CLASS);
            if let Err(err) = img.style().set_property("max-height", IMAGE_PREVIEW_MAX_HEIGHT) {
                log::debug!("thumbnail style rejected: {err:?}");
            }
            if let Err(err) = self.container.append_child(&img) {
                log::warn!("failed to append thumbnail: {err:?}");
            }
        }

        fn append_audio(&self, src: &str, mime: &str) {
            let audio = self
                .doc
                .create_element("audio")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
            let source = self
                .doc
                .create_element("source")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlSourceElement>().ok());
            let (Some(audio), Some(source)) = (audio, source) else {
                return;
            };

            audio.set_controls(true);
            audio.set_class_name(AUDIO_PLAYER_CLASS);
            source.set_src(src);
            source.set_type(mime);
            let appended = audio
                .append_child(&source)
                .and_then(|_| self.container.append_child(&audio));
            if let Err(err) = appended {
                log::warn!("failed to append audio player: {err:?}");
            }
        }

        fn release_url(&self, url: &str) {
            if let Err(err) = Url::revoke_object_url(url) {
                log::debug!("failed to revoke {url}: {err:?}");
            }
        }
    }

    impl SelectedFile for File {
        fn file_name(&self) -> String {
            self.name()
        }

        fn byte_size(&self) -> u64 {
            // Sizes beyond 2^53 are not representable in JS anyway.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = self.size() as u64;
            size
        }

        fn mime(&self) -> String {
            self.type_()
        }

        async fn read_data_url(&self) -> Result<String, String> {
            read_as_data_url(self).await.map_err(|err| format!("{err:?}"))
        }

        fn object_url(&self) -> Option<String> {
            Url::create_object_url_with_blob(self)
                .inspect_err(|err| log::debug!("object url failed: {err:?}"))
                .ok()
        }
    }

    pub(super) fn init(config: &UiConfig) {
        let Some(doc) = dom::document() else {
            return;
        };
        let policy = Rc::new(UploadPolicy::from_config(config));
        let toast_ms = config.notification_duration_ms;

        for el in dom::query_all(&doc, INPUT_SELECTOR) {
            let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
                continue;
            };
            let container = input
                .get_attribute(PREVIEW_TARGET_ATTR)
                .and_then(|id| doc.get_element_by_id(&id));
            let Some(container) = container else {
                log::debug!("file input without preview container, skipping");
                continue;
            };

            let session = RefCell::new(PreviewSession::new(DomTarget { doc: doc.clone(), container }));
            let policy = Rc::clone(&policy);
            let source = input.clone();
            dom::listen(&input, "change", move |_| {
                on_change(&source, &session, &policy, toast_ms);
            });
        }
    }

    fn on_change(
        input: &HtmlInputElement,
        session: &RefCell<PreviewSession<DomTarget>>,
        policy: &UploadPolicy,
        toast_ms: u32,
    ) {
        let files: Vec<File> = input
            .files()
            .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
            .unwrap_or_default();
        let kind = PreviewKind::from_accept(&input.accept());

        let selection = session.borrow_mut().select(kind, files, policy);
        for issue in selection.issues {
            Notification::new(issue.to_string())
                .severity(Severity::Warning)
                .duration_ms(toast_ms)
                .show();
        }
        for read in selection.reads {
            wasm_bindgen_futures::spawn_local(read);
        }
    }

    /// Detaches the reader callbacks, aborting the read if still running.
    struct PendingRead {
        reader: FileReader,
        _on_load: Closure<dyn FnMut()>,
        _on_error: Closure<dyn FnMut()>,
    }

    impl Drop for PendingRead {
        fn drop(&mut self) {
            self.reader.set_onload(None);
            self.reader.set_onerror(None);
            if self.reader.ready_state() == FILE_READER_LOADING {
                self.reader.abort();
            }
        }
    }

    /// Read `file` as a `data:` URL.
    async fn read_as_data_url(file: &File) -> Result<String, wasm_bindgen::JsValue> {
        let reader = FileReader::new()?;
        let (tx, rx) = oneshot::channel::<bool>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let settle = |ok: bool| {
            let tx = Rc::clone(&tx);
            Closure::<dyn FnMut()>::new(move || {
                if let Some(tx) = tx.borrow_mut().take() {
                    // The receiver is gone once the read was superseded.
                    if tx.send(ok).is_err() {
                        log::trace!("file read settled after it was dropped");
                    }
                }
            })
        };
        let on_load = settle(true);
        let on_error = settle(false);
        reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
        reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let pending = PendingRead { reader, _on_load: on_load, _on_error: on_error };
        pending.reader.read_as_data_url(file)?;

        match rx.await {
            Ok(true) => pending
                .reader
                .result()?
                .as_string()
                .ok_or_else(|| wasm_bindgen::JsValue::from_str("file reader returned no data url")),
            _ => Err(pending
                .reader
                .error()
                .map_or_else(|| wasm_bindgen::JsValue::from_str("file read failed"), Into::into)),
        }
    }
}
