//! Session context: the audio and speech collaborators every screen shares.
//!
//! Built once, passed to each screen explicitly, started and stopped by the
//! caller.  Screens announce themselves with [`SessionContext::enter_screen`]
//! and [`SessionContext::leave_screen`]; background music pauses while no
//! screen is active.

use tracing::info;

// ════════════════════════════════════════════════════════════════════════════
// Collaborators
// ════════════════════════════════════════════════════════════════════════════

pub trait AudioOutput: Send {
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
}

pub trait Speech: Send {
    fn say(&mut self, text: &str);
    fn stop(&mut self);
}

/// Audio backend that only logs.
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioOutput for LogAudio {
    fn play(&mut self)  { info!(target: "audio", "background music playing"); }
    fn pause(&mut self) { info!(target: "audio", "background music paused"); }
    fn stop(&mut self)  { info!(target: "audio", "background music stopped"); }
}

/// Speech backend that only logs.
#[derive(Debug, Default)]
pub struct LogSpeech;

impl Speech for LogSpeech {
    fn say(&mut self, text: &str) { info!(target: "speech", text, "say"); }
    fn stop(&mut self)            { info!(target: "speech", "speech stopped"); }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionContext
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState { Idle, Running, Stopped }

pub struct SessionContext {
    audio:  Box<dyn AudioOutput>,
    speech: Box<dyn Speech>,
    state:  SessionState,
    screen: Option<String>,
}

impl SessionContext {
    pub fn new(audio: Box<dyn AudioOutput>, speech: Box<dyn Speech>) -> Self {
        SessionContext { audio, speech, state: SessionState::Idle, screen: None }
    }

    /// Logging-only collaborators.
    pub fn logging() -> Self {
        SessionContext::new(Box::new(LogAudio), Box::new(LogSpeech))
    }

    pub fn state(&self) -> SessionState { self.state }
    pub fn current_screen(&self) -> Option<&str> { self.screen.as_deref() }

    pub fn start(&mut self) {
        if self.state == SessionState::Idle {
            self.state = SessionState::Running;
            info!("session started");
        }
    }

    /// Resume music and announce the screen.  Ignored unless running.
    pub fn enter_screen(&mut self, name: &str, prompt: &str) {
        if self.state != SessionState::Running {
            return;
        }
        self.screen = Some(name.to_string());
        self.audio.play();
        if !prompt.is_empty() {
            self.speech.say(prompt);
        }
    }

    pub fn leave_screen(&mut self) {
        if self.screen.take().is_some() {
            self.audio.pause();
            self.speech.stop();
        }
    }

    pub fn stop(&mut self) {
        if self.state == SessionState::Stopped {
            return;
        }
        self.leave_screen();
        self.audio.stop();
        self.speech.stop();
        self.state = SessionState::Stopped;
        info!("session stopped");
    }
}

impl Drop for SessionContext {
    fn drop(&mut self) {
        if self.state == SessionState::Running { self.stop(); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    struct Rec(Log);
    impl AudioOutput for Rec {
        fn play(&mut self)  { self.0.lock().unwrap().push("play".into()); }
        fn pause(&mut self) { self.0.lock().unwrap().push("pause".into()); }
        fn stop(&mut self)  { self.0.lock().unwrap().push("stop".into()); }
    }
    impl Speech for Rec {
        fn say(&mut self, text: &str) { self.0.lock().unwrap().push(format!("say {}", text)); }
        fn stop(&mut self)            { self.0.lock().unwrap().push("hush".into()); }
    }

    fn session() -> (SessionContext, Log) {
        let log: Log = Arc::default();
        let s = SessionContext::new(Box::new(Rec(log.clone())), Box::new(Rec(log.clone())));
        (s, log)
    }

    #[test]
    fn screen_lifecycle() {
        let (mut s, log) = session();
        s.start();
        s.enter_screen("choose", "All poses or training?");
        assert_eq!(s.current_screen(), Some("choose"));
        s.leave_screen();
        s.stop();
        assert_eq!(
            *log.lock().unwrap(),
            ["play", "say All poses or training?", "pause", "hush", "stop", "hush"]
        );
        assert_eq!(s.state(), SessionState::Stopped);
    }

    #[test]
    fn nothing_before_start() {
        let (mut s, log) = session();
        s.enter_screen("main", "");
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(s.current_screen(), None);
    }

    #[test]
    fn stop_leaves_the_active_screen() {
        let (mut s, log) = session();
        s.start();
        s.enter_screen("main", "");
        s.stop();
        s.stop();
        assert_eq!(*log.lock().unwrap(), ["play", "pause", "hush", "stop", "hush"]);
    }
}
