//! Windowed presentation: the winit event loop that drives the renderer
//! once per display refresh.
//!
//! The loop is single-threaded and cooperative. `RedrawRequested` renders
//! a frame; `AboutToWait` re-requests a redraw, extending the chain — but
//! only while the [`FrameScheduler`] still arms, so cancelling the token
//! is an explicit, observable teardown.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{error, warn};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::board::Board;
use crate::error::RenderError;
use crate::gpu::BoardRenderer;
use crate::scheduler::{CancelToken, FrameScheduler};
use crate::ViewOptions;

/// Opens a window, builds a [`BoardRenderer`] for it, and runs the frame
/// loop until the window closes, the token is cancelled, or a fatal render
/// error occurs.
///
/// `on_frame` is the simulation's seat at the table: it is invoked before
/// every draw and may mutate the board; returning `true` signals that the
/// tiles changed and must be re-uploaded.
pub fn run_windowed<F>(
    options: ViewOptions,
    mut board: Board,
    token: CancelToken,
    mut on_frame: F,
) -> Result<()>
where
    F: FnMut(&mut Board) -> bool,
{
    let event_loop = EventLoop::new().context("failed to initialise event loop")?;
    let window_size = PhysicalSize::new(options.window_size.0, options.window_size.1);
    let window = WindowBuilder::new()
        .with_title(&options.title)
        .with_inner_size(window_size)
        .build(&event_loop)
        .context("failed to create window")?;
    let window = Arc::new(window);

    let mut gpu = BoardRenderer::new(window.as_ref(), window.inner_size(), &board)?;
    if !options.colours.is_empty() {
        gpu.update_colours(&options.colours)
            .context("failed to apply initial palette")?;
    }

    let mut scheduler = FrameScheduler::new(token);
    let failure: Rc<RefCell<Option<RenderError>>> = Rc::new(RefCell::new(None));
    let loop_failure = Rc::clone(&failure);

    window.request_redraw();
    let loop_window = Arc::clone(&window);
    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent { window_id, event } if window_id == loop_window.id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            scheduler.token().cancel();
                            gpu.dispose();
                            elwt.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            gpu.resize_surface(new_size);
                        }
                        WindowEvent::RedrawRequested => {
                            let changed = on_frame(&mut board);
                            let result = if changed {
                                push_board(&mut gpu, &board)
                            } else {
                                gpu.render()
                            };
                            match result {
                                Ok(()) => {}
                                Err(err) if err.requires_reconfigure() => {
                                    // Reconfiguring against the current
                                    // window size recovers the swapchain.
                                    gpu.resize_surface(loop_window.inner_size());
                                }
                                Err(RenderError::Surface(err)) => {
                                    warn!(error = ?err, "dropped frame; retrying next frame");
                                }
                                Err(fatal) if fatal.is_fatal() => {
                                    error!(error = %fatal, "fatal render error; halting frame loop");
                                    *loop_failure.borrow_mut() = Some(fatal);
                                    scheduler.token().cancel();
                                    gpu.dispose();
                                    elwt.exit();
                                }
                                Err(other) => {
                                    warn!(error = %other, "render error; retrying next frame");
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    // Re-register for the next frame, or stop the chain.
                    if scheduler.arm() {
                        loop_window.request_redraw();
                    } else {
                        tracing::debug!(
                            frames = scheduler.frames_scheduled(),
                            "frame chain cancelled; leaving event loop"
                        );
                        elwt.exit();
                    }
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))?;

    if let Some(err) = failure.borrow_mut().take() {
        return Err(err.into());
    }
    Ok(())
}

/// Pushes the simulation's board to the renderer, rebuilding the screen
/// texture first if the board was resized since the last frame. Without the
/// resize step a grown or shrunk board would fail every subsequent upload
/// with a dimension mismatch.
fn push_board(gpu: &mut BoardRenderer, board: &Board) -> Result<(), RenderError> {
    if needs_board_resize(gpu.board_dimensions(), board) {
        gpu.resize_board(board.width(), board.height())?;
    }
    gpu.update_tiles(board)
}

fn needs_board_resize(screen: (u32, u32), board: &Board) -> bool {
    screen != (board.width(), board.height())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_dimensions_need_no_resize() {
        let board = Board::new(4, 3);
        assert!(!needs_board_resize((4, 3), &board));
    }

    #[test]
    fn resized_board_triggers_a_screen_rebuild() {
        let mut board = Board::new(4, 3);
        assert!(!needs_board_resize((4, 3), &board));

        board.resize(8, 6);
        assert!(needs_board_resize((4, 3), &board));
    }
}
