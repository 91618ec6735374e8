use std::path::Path;

/// Background music. Playback problems never reach the game.
pub trait MusicPlayer {
    /// Starts looping playback. Calling it again has no effect.
    fn start(&mut self);
}

#[derive(Debug, Default)]
pub struct NoMusic;

impl MusicPlayer for NoMusic {
    fn start(&mut self) {}
}

/// Picks a player for `--music`.
pub fn from_path(path: Option<&Path>) -> Box<dyn MusicPlayer> {
    let Some(path) = path else {
        return Box::new(NoMusic);
    };

    #[cfg(feature = "music")]
    {
        Box::new(rodio_player::RodioMusic::new(path))
    }

    #[cfg(not(feature = "music"))]
    {
        log::warn!(
            "ignoring music file {}: built without the `music` feature",
            path.display()
        );
        Box::new(NoMusic)
    }
}

#[cfg(feature = "music")]
mod rodio_player {
    use std::{
        fs::File,
        io::BufReader,
        path::{Path, PathBuf},
    };

    use anyhow::Context as _;
    use log::{info, warn};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source as _};

    use super::MusicPlayer;

    const VOLUME: f32 = 0.5;

    /// Loops an audio file through the default output device.
    pub struct RodioMusic {
        path: PathBuf,
        playback: Option<Playback>,
    }

    struct Playback {
        // dropping the stream stops the sound
        _stream: OutputStream,
        _handle: OutputStreamHandle,
        _sink: Sink,
    }

    impl RodioMusic {
        pub fn new(path: &Path) -> Self {
            Self {
                path: path.to_owned(),
                playback: None,
            }
        }

        fn open(&self) -> anyhow::Result<Playback> {
            let file = File::open(&self.path)
                .with_context(|| format!("Failed to open {}", self.path.display()))?;
            let source = Decoder::new(BufReader::new(file))
                .with_context(|| format!("Failed to decode {}", self.path.display()))?;
            let (stream, handle) =
                OutputStream::try_default().context("No audio output device")?;
            let sink = Sink::try_new(&handle).context("Failed to create audio sink")?;
            sink.set_volume(VOLUME);
            sink.append(source.repeat_infinite());
            Ok(Playback {
                _stream: stream,
                _handle: handle,
                _sink: sink,
            })
        }
    }

    impl MusicPlayer for RodioMusic {
        fn start(&mut self) {
            if self.playback.is_some() {
                return;
            }
            match self.open() {
                Ok(playback) => {
                    info!("playing {}", self.path.display());
                    self.playback = Some(playback);
                }
                Err(e) => warn!("music disabled: {e:#}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_means_silence() {
        let mut player = from_path(None);
        player.start();
        player.start();
    }

    #[test]
    fn test_missing_file_degrades_to_silence() {
        let mut player = from_path(Some(Path::new("/nonexistent/blockfall/music.ogg")));
        player.start();
    }
}
