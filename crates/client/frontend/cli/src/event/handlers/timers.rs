//! Placement animation timers.

use client_frontend_core::AnimationId;

use super::super::EventLoop;

impl EventLoop {
    /// Starts a one-shot sleep for every animation the view model began
    /// since the last pass.
    pub(in crate::event) fn schedule_animations(&mut self) {
        let duration = self.cli_config.ui.animation;
        for animation in self.session.presenter_mut().take_started_animations() {
            let tx = self.animation_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                // The loop may already be gone on shutdown.
                let _ = tx.send(animation);
            });
        }
    }

    pub(in crate::event) fn finish_animation(&mut self, animation: AnimationId) {
        self.session.presenter_mut().finish_animation(animation);
        self.session.animation_finished(animation);
    }
}
