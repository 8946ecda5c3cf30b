//! `MediaElement` over a browser `HtmlAudioElement`

use crate::error::{PlayerError, Result};
use crate::media::{EventSink, MediaElement, MediaEvent};
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlAudioElement};

const TIME_UPDATE: &str = "timeupdate";
const LOADED_METADATA: &str = "loadedmetadata";
const ENDED: &str = "ended";

/// DOM listeners registered for one subscription
struct Listeners {
    time_update: Closure<dyn FnMut(Event)>,
    loaded_metadata: Closure<dyn FnMut(Event)>,
    ended: Closure<dyn FnMut(Event)>,
}

impl Listeners {
    fn each(&self) -> [(&'static str, &Closure<dyn FnMut(Event)>); 3] {
        [
            (TIME_UPDATE, &self.time_update),
            (LOADED_METADATA, &self.loaded_metadata),
            (ENDED, &self.ended),
        ]
    }
}

/// Browser audio element driven by the player
pub struct HtmlAudioMedia {
    element: HtmlAudioElement,
    sink: Option<EventSink>,
    listeners: Option<Listeners>,
}

impl HtmlAudioMedia {
    /// Wrap an existing `<audio>` element
    pub fn new(element: HtmlAudioElement) -> Self {
        Self {
            element,
            sink: None,
            listeners: None,
        }
    }

    /// Create a detached `<audio>` element
    pub fn create() -> Result<Self> {
        let element = HtmlAudioElement::new().map_err(|e| PlayerError::Media(js_error(&e)))?;
        Ok(Self::new(element))
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl MediaElement for HtmlAudioMedia {
    fn load(&mut self, url: &str) -> Result<()> {
        self.element.set_src(url);
        self.element.load();
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlayerError::PlaybackRejected(js_error(&e)))?;

        // Autoplay refusals surface as a rejected promise
        if let Some(sink) = self.sink.clone() {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    sink.emit(MediaEvent::PlaybackRejected(js_error(&e)));
                }
            });
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.element
            .pause()
            .map_err(|e| PlayerError::Media(js_error(&e)))
    }

    fn set_position(&mut self, seconds: f64) -> Result<()> {
        self.element.set_current_time(seconds);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.element.set_volume(f64::from(volume));
        Ok(())
    }

    fn subscribe(&mut self, sink: EventSink) {
        // One listener set per element
        self.unsubscribe();

        let listeners = {
            let element = self.element.clone();
            let events = sink.clone();
            let time_update = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                events.emit(MediaEvent::TimeUpdate(element.current_time()));
            });

            let element = self.element.clone();
            let events = sink.clone();
            let loaded_metadata = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                events.emit(MediaEvent::MetadataReady(element.duration()));
            });

            let events = sink.clone();
            let ended = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                events.emit(MediaEvent::Ended);
            });

            Listeners {
                time_update,
                loaded_metadata,
                ended,
            }
        };

        for (name, callback) in listeners.each() {
            if let Err(e) = self
                .element
                .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
            {
                warn!("Failed to add {} listener: {}", name, js_error(&e));
            }
        }

        self.listeners = Some(listeners);
        self.sink = Some(sink);
    }

    fn unsubscribe(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            for (name, callback) in listeners.each() {
                if let Err(e) = self
                    .element
                    .remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
                {
                    warn!("Failed to remove {} listener: {}", name, js_error(&e));
                }
            }
        }
        self.sink = None;
    }
}

impl Drop for HtmlAudioMedia {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
