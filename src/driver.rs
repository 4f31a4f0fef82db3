//! Headless frame driver: a fixed-rate display clock with scripted input replay

use crate::bezier::ControlPolygon;
use crate::error::SimError;
use crate::models::{RateSample, TouchEvent};
use crate::point::Point2;
use crate::session::{Input, InputSender, RenderFrame, Session};
use serde::Serialize;

/// Called once per frame after the tick, in place of a redraw request
pub trait FrameObserver {
    fn redraw(&mut self, index: usize, time: f64, frame: RenderFrame);
}

impl<F> FrameObserver for F
where
    F: FnMut(usize, f64, RenderFrame),
{
    fn redraw(&mut self, index: usize, time: f64, frame: RenderFrame) {
        self(index, time, frame)
    }
}

/// Per-frame record written by the JSON trace output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub frame: usize,
    pub time: f64,
    pub polygon: ControlPolygon,
    pub targets: [Point2; 2],
}

impl TraceEntry {
    pub fn new(frame: usize, time: f64, render: &RenderFrame) -> Self {
        Self {
            frame,
            time,
            polygon: render.polygon,
            targets: render.targets,
        }
    }
}

/// Observer that keeps the latest frame, plus the per-frame trace when asked to
#[derive(Debug, Default)]
pub struct TraceRecorder {
    entries: Option<Vec<TraceEntry>>,
    last: Option<RenderFrame>,
}

impl TraceRecorder {
    pub fn new(keep_trace: bool) -> Self {
        Self {
            entries: keep_trace.then(Vec::new),
            last: None,
        }
    }

    /// Recorded entries; empty unless the recorder was built with `keep_trace`
    pub fn entries(&self) -> &[TraceEntry] {
        self.entries.as_deref().unwrap_or_default()
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last.as_ref()
    }

    pub fn into_parts(self) -> (Vec<TraceEntry>, Option<RenderFrame>) {
        (self.entries.unwrap_or_default(), self.last)
    }
}

impl FrameObserver for TraceRecorder {
    fn redraw(&mut self, index: usize, time: f64, frame: RenderFrame) {
        if let Some(entries) = &mut self.entries {
            entries.push(TraceEntry::new(index, time, &frame));
        }
        self.last = Some(frame);
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledInput {
    time: f64,
    input: Input,
}

pub struct FrameDriver {
    fps: f64,
    schedule: Vec<ScheduledInput>,
    cursor: usize,
    frame: usize,
}

impl FrameDriver {
    pub fn new(fps: f64) -> Result<Self, SimError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(SimError::invalid("fps", fps, "must be a positive finite rate"));
        }
        Ok(Self {
            fps,
            schedule: Vec::new(),
            cursor: 0,
            frame: 0,
        })
    }

    /// Queue recorded rate samples for replay at their timestamps
    pub fn with_rate_trace(mut self, samples: &[RateSample]) -> Self {
        self.schedule.extend(samples.iter().map(|s| ScheduledInput {
            time: s.time,
            input: Input::Rate {
                rate_x: s.rate_x,
                rate_y: s.rate_y,
            },
        }));
        self.sort_schedule();
        self
    }

    pub fn with_touches(mut self, touches: &[TouchEvent]) -> Self {
        self.schedule.extend(touches.iter().map(|t| ScheduledInput {
            time: t.time,
            input: match t.location {
                Some(location) => Input::Touch(location),
                None => Input::Release,
            },
        }));
        self.sort_schedule();
        self
    }

    /// Stable, so inputs sharing a timestamp keep their given order
    fn sort_schedule(&mut self) {
        self.schedule[self.cursor..].sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    pub fn frame_time(&self, index: usize) -> f64 {
        index as f64 / self.fps
    }

    /// Run `frames` frames: deliver due inputs, tick, then hand the frame to the observer.
    pub fn run<O>(&mut self, session: &mut Session, frames: usize, observer: &mut O) -> Result<(), SimError>
    where
        O: FrameObserver + ?Sized,
    {
        let sender = session.input_sender();
        for _ in 0..frames {
            let index = self.frame;
            let time = self.frame_time(index);
            self.deliver_due(&sender, time)?;
            session.tick(time);
            observer.redraw(index, time, session.render_frame());
            self.frame += 1;
        }
        Ok(())
    }

    fn deliver_due(&mut self, sender: &InputSender, time: f64) -> Result<(), SimError> {
        while let Some(next) = self.schedule.get(self.cursor) {
            if next.time > time {
                break;
            }
            sender.send(next.input)?;
            self.cursor += 1;
        }
        Ok(())
    }

    pub fn pending_inputs(&self) -> usize {
        self.schedule.len() - self.cursor
    }
}
