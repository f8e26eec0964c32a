//! Click / upgrade sound effects.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Click,
    Upgrade,
}

impl Sound {
    pub fn asset(&self) -> &'static str {
        match self {
            Sound::Click => "./assets/sounds/click.ogg",
            Sound::Upgrade => "./assets/sounds/upgrade.ogg",
        }
    }

    pub fn volume(&self) -> f64 {
        match self {
            Sound::Click => 0.2,
            Sound::Upgrade => 0.5,
        }
    }
}

/// Fire-and-forget playback. Overlapping plays must not cut each other off.
pub trait SoundPlayer {
    fn play(&self, sound: Sound);
}

/// Plays nothing. Used off the web and in tests.
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&self, _sound: Sound) {}
}

/// The player for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn default_player() -> Box<dyn SoundPlayer> {
    match WebAudio::new() {
        Some(audio) => Box::new(audio),
        None => {
            log::warn!("audio unavailable, continuing without sound");
            Box::new(Silent)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_player() -> Box<dyn SoundPlayer> {
    Box::new(Silent)
}

/// `<audio>` elements preloaded once and cloned on every play.
#[cfg(target_arch = "wasm32")]
pub struct WebAudio {
    click: web_sys::HtmlAudioElement,
    upgrade: web_sys::HtmlAudioElement,
}

#[cfg(target_arch = "wasm32")]
impl WebAudio {
    pub fn new() -> Option<Self> {
        Some(Self {
            click: preload(Sound::Click)?,
            upgrade: preload(Sound::Upgrade)?,
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn preload(sound: Sound) -> Option<web_sys::HtmlAudioElement> {
    let audio = web_sys::HtmlAudioElement::new_with_src(sound.asset()).ok()?;
    audio.set_preload("auto");
    audio.load();
    Some(audio)
}

#[cfg(target_arch = "wasm32")]
impl SoundPlayer for WebAudio {
    fn play(&self, sound: Sound) {
        use wasm_bindgen::JsCast;

        let source = match sound {
            Sound::Click => &self.click,
            Sound::Upgrade => &self.upgrade,
        };
        let audio = match source.clone_node() {
            Ok(node) => match node.dyn_into::<web_sys::HtmlAudioElement>() {
                Ok(a) => a,
                Err(_) => return,
            },
            Err(e) => {
                log::warn!("failed to clone {:?} sound: {e:?}", sound);
                return;
            }
        };
        audio.set_volume(sound.volume());
        if let Err(e) = audio.play() {
            log::warn!("failed to play {:?} sound: {e:?}", sound);
        }
    }
}
