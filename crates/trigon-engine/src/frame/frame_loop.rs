use crate::input::{InputState, Key};
use crate::render::FrameTarget;

use super::settings::{FrameSettings, TRIANGLE};

/// Loop state. `Stopped` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Events the loop reacts to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopEvent {
    /// The window was closed or the platform asked the process to quit.
    Quit,
    /// A key went down.
    KeyDown(Key),
}

/// Drains queued events, then redraws the triangle.
///
/// Generic over the program handle so it can drive any `FrameTarget`.
pub struct FrameLoop<P> {
    state: LoopState,
    program: Option<P>,
    settings: FrameSettings,
    warned_missing_program: bool,
}

impl<P> FrameLoop<P> {
    /// `program` is `None` when compilation or linkage failed.
    pub fn new(program: Option<P>, settings: FrameSettings) -> Self {
        Self {
            state: LoopState::Running,
            program,
            settings,
            warned_missing_program: false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Forces the terminal state, e.g. after a fatal surface error.
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Consumes every pending event.
    ///
    /// `Quit` stops the loop. `KeyDown` stops it when the cancel key is held
    /// in `keyboard`, whichever key the event itself carries.
    pub fn drain_events<I>(&mut self, events: I, keyboard: &InputState) -> LoopState
    where
        I: IntoIterator<Item = LoopEvent>,
    {
        for event in events {
            match event {
                LoopEvent::Quit => {
                    log::debug!("quit requested");
                    self.state = LoopState::Stopped;
                }
                LoopEvent::KeyDown(_) => {
                    if keyboard.key_down(self.settings.cancel_key) {
                        log::debug!("{} held, stopping", self.settings.cancel_key);
                        self.state = LoopState::Stopped;
                    }
                }
            }
        }
        self.state
    }

    /// Draws one frame if still running.
    ///
    /// Without a program the frame is still cleared and presented, but the
    /// bind and draw are skipped.
    pub fn draw<T>(&mut self, target: &mut T)
    where
        T: FrameTarget<Program = P>,
    {
        if !self.is_running() {
            return;
        }

        target.clear(self.settings.clear_color);
        target.set_viewport(self.settings.viewport);

        match self.program.as_ref() {
            Some(program) => {
                target.use_program(program);
                target.upload_positions(&TRIANGLE);
                target.draw_triangles(0, TRIANGLE.len() as u32);
            }
            None => {
                if !self.warned_missing_program {
                    log::warn!("no usable shader program; drawing nothing");
                    self.warned_missing_program = true;
                }
            }
        }

        target.present();
    }

    /// One loop iteration: drain events, then draw if still running.
    pub fn iterate<I, T>(&mut self, events: I, keyboard: &InputState, target: &mut T) -> LoopState
    where
        I: IntoIterator<Item = LoopEvent>,
        T: FrameTarget<Program = P>,
    {
        if self.drain_events(events, keyboard) == LoopState::Running {
            self.draw(target);
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{ColorRgba, Viewport};
    use crate::input::{InputEvent, KeyState};
    use crate::render::Position;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear(ColorRgba),
        Viewport(Viewport),
        UseProgram(u32),
        Upload(Vec<u8>),
        Draw(u32, u32),
        Present,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }

        fn uploads(&self) -> Vec<&[u8]> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Upload(b) => Some(b.as_slice()),
                    _ => None,
                })
                .collect()
        }
    }

    impl FrameTarget for Recorder {
        type Program = u32;

        fn clear(&mut self, color: ColorRgba) {
            self.calls.push(Call::Clear(color));
        }
        fn set_viewport(&mut self, viewport: Viewport) {
            self.calls.push(Call::Viewport(viewport));
        }
        fn use_program(&mut self, program: &u32) {
            self.calls.push(Call::UseProgram(*program));
        }
        fn upload_positions(&mut self, positions: &[Position]) {
            self.calls.push(Call::Upload(bytemuck::cast_slice(positions).to_vec()));
        }
        fn draw_triangles(&mut self, first: u32, count: u32) {
            self.calls.push(Call::Draw(first, count));
        }
        fn present(&mut self) {
            self.calls.push(Call::Present);
        }
    }

    const NO_EVENTS: [LoopEvent; 0] = [];

    fn looped() -> FrameLoop<u32> {
        FrameLoop::new(Some(7), FrameSettings::default())
    }

    fn held(keys: &[Key]) -> InputState {
        let mut s = InputState::default();
        for k in keys {
            s.apply_event(&InputEvent::Key { key: *k, state: KeyState::Pressed, repeat: false });
        }
        s
    }

    #[test]
    fn starts_running() {
        assert_eq!(looped().state(), LoopState::Running);
    }

    #[test]
    fn quit_stops_before_any_draw() {
        let mut fl = looped();
        let mut rec = Recorder::default();
        let state = fl.iterate([LoopEvent::Quit], &InputState::default(), &mut rec);
        assert_eq!(state, LoopState::Stopped);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn quit_after_other_events_still_stops() {
        let mut fl = looped();
        let mut rec = Recorder::default();
        let events = [
            LoopEvent::KeyDown(Key::Space),
            LoopEvent::Quit,
            LoopEvent::KeyDown(Key::Enter),
        ];
        assert_eq!(fl.iterate(events, &held(&[Key::Space]), &mut rec), LoopState::Stopped);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn key_down_with_cancel_key_held_stops() {
        let mut fl = looped();
        let mut rec = Recorder::default();
        let state = fl.iterate([LoopEvent::KeyDown(Key::Escape)], &held(&[Key::Escape]), &mut rec);
        assert_eq!(state, LoopState::Stopped);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn cancel_is_read_from_keyboard_state_not_event() {
        // Another key's press event stops the loop while Escape is held.
        let mut fl = looped();
        assert_eq!(
            fl.drain_events([LoopEvent::KeyDown(Key::Space)], &held(&[Key::Escape, Key::Space])),
            LoopState::Stopped
        );

        // An Escape press event does not stop it once Escape is released again.
        let mut fl = looped();
        assert_eq!(
            fl.drain_events([LoopEvent::KeyDown(Key::Escape)], &InputState::default()),
            LoopState::Running
        );
    }

    #[test]
    fn other_keys_keep_running() {
        let mut fl = looped();
        let state = fl.drain_events([LoopEvent::KeyDown(Key::Enter)], &held(&[Key::Enter]));
        assert_eq!(state, LoopState::Running);
    }

    #[test]
    fn one_of_each_call_per_iteration() {
        let mut fl = looped();
        let mut rec = Recorder::default();
        fl.iterate(NO_EVENTS, &InputState::default(), &mut rec);

        let gray = ColorRgba::new(0.2, 0.2, 0.2, 1.0);
        assert_eq!(
            rec.calls,
            vec![
                Call::Clear(gray),
                Call::Viewport(Viewport::sized(512, 512)),
                Call::UseProgram(7),
                Call::Upload(bytemuck::cast_slice(&TRIANGLE).to_vec()),
                Call::Draw(0, 3),
                Call::Present,
            ]
        );
    }

    #[test]
    fn vertex_bytes_identical_across_iterations() {
        let mut fl = looped();
        let mut rec = Recorder::default();
        for _ in 0..5 {
            fl.iterate(NO_EVENTS, &InputState::default(), &mut rec);
        }

        assert_eq!(rec.count(|c| matches!(c, Call::Clear(_))), 5);
        assert_eq!(rec.count(|c| matches!(c, Call::Viewport(_))), 5);
        assert_eq!(rec.count(|c| matches!(c, Call::Draw(..))), 5);
        assert_eq!(rec.count(|c| matches!(c, Call::Present)), 5);

        let uploads = rec.uploads();
        assert_eq!(uploads.len(), 5);
        assert_eq!(uploads[0].len(), 36);
        assert!(uploads.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn stopped_is_terminal() {
        let mut fl = looped();
        let mut rec = Recorder::default();
        fl.iterate([LoopEvent::Quit], &InputState::default(), &mut rec);
        fl.iterate(NO_EVENTS, &InputState::default(), &mut rec);
        fl.draw(&mut rec);
        assert_eq!(fl.state(), LoopState::Stopped);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn missing_program_clears_and_presents_without_drawing() {
        let mut fl: FrameLoop<u32> = FrameLoop::new(None, FrameSettings::default());
        let mut rec = Recorder::default();
        fl.iterate(NO_EVENTS, &InputState::default(), &mut rec);
        fl.iterate(NO_EVENTS, &InputState::default(), &mut rec);

        assert_eq!(fl.state(), LoopState::Running);
        assert_eq!(rec.count(|c| matches!(c, Call::Clear(_))), 2);
        assert_eq!(rec.count(|c| matches!(c, Call::Present)), 2);
        assert_eq!(rec.count(|c| matches!(c, Call::UseProgram(_) | Call::Draw(..))), 0);
    }

    #[test]
    fn custom_cancel_key() {
        let settings = FrameSettings { cancel_key: Key::Backspace, ..FrameSettings::default() };
        let mut fl = FrameLoop::new(Some(1u32), settings);
        assert_eq!(
            fl.drain_events([LoopEvent::KeyDown(Key::Escape)], &held(&[Key::Escape])),
            LoopState::Running
        );
        assert_eq!(
            fl.drain_events([LoopEvent::KeyDown(Key::Backspace)], &held(&[Key::Backspace])),
            LoopState::Stopped
        );
    }
}
