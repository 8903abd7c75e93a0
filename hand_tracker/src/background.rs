//! Adaptive per-pixel Gaussian mixture background model.
//!
//! Every pixel keeps up to [`MAX_MODES`] Gaussian modes in RGB space, sorted by
//! weight. The heaviest modes whose cumulative weight stays under
//! `background_ratio` describe the static scene; a sample that lands close to
//! one of them is background, anything else is foreground. The learning rate
//! is `1 / min(2 * frames_seen, history)`, so the model settles quickly at
//! start-up and then forgets at a rate set by `history`.
//!
//! With shadow detection enabled, a foreground sample that looks like a darker
//! copy of a background mode is reported as [`SHADOW`] instead of
//! [`FOREGROUND`].

use crate::{Frame, Mask};
use image::Luma;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MAX_MODES: usize = 5;

pub const BACKGROUND: u8 = 0;
pub const SHADOW: u8 = 127;
pub const FOREGROUND: u8 = 255;

/// Tuning for [`BackgroundModel`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundParams {
    /// Number of frames that shape the model
    pub history: u32,
    /// Squared Mahalanobis distance under which a sample matches a background mode
    pub var_threshold: f32,
    pub detect_shadows: bool,
    /// Squared distance under which a sample updates an existing mode
    pub var_threshold_gen: f32,
    pub background_ratio: f32,
    pub var_init: f32,
    pub var_min: f32,
    pub var_max: f32,
    /// Complexity reduction prior: weak modes decay to zero and get dropped
    pub complexity_reduction: f32,
    /// Minimum brightness ratio for a darker sample to count as shadow
    pub shadow_threshold: f32,
}

impl Default for BackgroundParams {
    fn default() -> Self {
        Self {
            history: 300,
            var_threshold: 25.0,
            detect_shadows: true,
            var_threshold_gen: 9.0,
            background_ratio: 0.9,
            var_init: 15.0,
            var_min: 4.0,
            var_max: 75.0,
            complexity_reduction: 0.05,
            shadow_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Mode {
    weight: f32,
    mean: [f32; 3],
    var: f32,
}

impl Mode {
    fn dist2(&self, sample: &[f32; 3]) -> f32 {
        let d0 = sample[0] - self.mean[0];
        let d1 = sample[1] - self.mean[1];
        let d2 = sample[2] - self.mean[2];
        d0 * d0 + d1 * d1 + d2 * d2
    }
}

pub struct BackgroundModel {
    params: BackgroundParams,
    width: u32,
    height: u32,
    modes: Vec<Mode>,
    used: Vec<u8>,
    frames_seen: u32,
}

impl BackgroundModel {
    pub fn new(params: BackgroundParams) -> Self {
        Self {
            params,
            width: 0,
            height: 0,
            modes: Vec::new(),
            used: Vec::new(),
            frames_seen: 0,
        }
    }

    pub fn frames_seen(&self) -> u32 {
        self.frames_seen
    }

    fn reset(&mut self, width: u32, height: u32) {
        let pixels = (width as usize) * (height as usize);
        self.width = width;
        self.height = height;
        self.modes = vec![Mode::default(); pixels * MAX_MODES];
        self.used = vec![0; pixels];
        self.frames_seen = 0;
    }

    /// Learning rate for the next frame
    fn learning_rate(&self) -> f32 {
        let horizon = self.frames_seen.saturating_mul(2).min(self.params.history).max(1);
        1.0 / horizon as f32
    }

    /// Classify every pixel of `frame` and fold the frame into the model
    pub fn apply(&mut self, frame: &Frame) -> Mask {
        let (width, height) = frame.dimensions();
        if (width, height) != (self.width, self.height) {
            if self.frames_seen > 0 {
                warn!(
                    "Frame size changed from {}x{} to {}x{}, relearning background",
                    self.width, self.height, width, height
                );
            }
            self.reset(width, height);
        }

        self.frames_seen = self.frames_seen.saturating_add(1);
        let alpha = self.learning_rate();
        let params = self.params;

        let mut mask = Mask::new(width, height);
        for (i, (pixel, out)) in frame.pixels().zip(mask.pixels_mut()).enumerate() {
            let sample = [pixel[0] as f32, pixel[1] as f32, pixel[2] as f32];
            let modes = &mut self.modes[i * MAX_MODES..(i + 1) * MAX_MODES];
            let label = update_pixel(modes, &mut self.used[i], &sample, alpha, &params);
            *out = Luma([label]);
        }
        mask
    }
}

/// Classify one sample against its modes, then update them
fn update_pixel(
    modes: &mut [Mode],
    used: &mut u8,
    sample: &[f32; 3],
    alpha: f32,
    params: &BackgroundParams,
) -> u8 {
    let mut n = *used as usize;

    // Classification against the current, weight-sorted modes
    let mut background = false;
    let mut matched = None;
    let mut cumulative = 0.0;
    for (m, mode) in modes[..n].iter().enumerate() {
        let dist2 = mode.dist2(sample);
        if cumulative < params.background_ratio && dist2 < params.var_threshold * mode.var {
            background = true;
        }
        if matched.is_none() && dist2 < params.var_threshold_gen * mode.var {
            matched = Some((m, dist2));
        }
        cumulative += mode.weight;
    }

    // Shadows are judged against the model as it was before this sample
    let shadow = !background && params.detect_shadows && is_shadow(&modes[..n], sample, params);

    // Decay all weights, reinforce the matched mode
    let prune = -alpha * params.complexity_reduction;
    for mode in modes[..n].iter_mut() {
        mode.weight = (1.0 - alpha) * mode.weight + prune;
    }
    match matched {
        Some((m, dist2)) => {
            let mode = &mut modes[m];
            mode.weight += alpha;
            let k = alpha / mode.weight;
            for c in 0..3 {
                mode.mean[c] += k * (sample[c] - mode.mean[c]);
            }
            mode.var = (mode.var + k * (dist2 - mode.var)).clamp(params.var_min, params.var_max);
        }
        None => {
            // Replace the weakest mode when full
            let slot = if n < MAX_MODES {
                n += 1;
                n - 1
            } else {
                MAX_MODES - 1
            };
            modes[slot] = Mode {
                weight: alpha,
                mean: *sample,
                var: params.var_init,
            };
        }
    }

    // Drop modes whose weight decayed away, keeping order
    let mut kept = 0;
    for m in 0..n {
        if modes[m].weight > 0.0 {
            modes[kept] = modes[m];
            kept += 1;
        }
    }
    n = kept;

    let total: f32 = modes[..n].iter().map(|mode| mode.weight).sum();
    if total > 0.0 {
        for mode in modes[..n].iter_mut() {
            mode.weight /= total;
        }
    }

    // Insertion sort, heaviest first
    for m in 1..n {
        let mut j = m;
        while j > 0 && modes[j].weight > modes[j - 1].weight {
            modes.swap(j, j - 1);
            j -= 1;
        }
    }
    *used = n as u8;

    if background {
        BACKGROUND
    } else if shadow {
        SHADOW
    } else {
        FOREGROUND
    }
}

/// A darker, colour-preserving copy of a background mode
fn is_shadow(modes: &[Mode], sample: &[f32; 3], params: &BackgroundParams) -> bool {
    let mut cumulative = 0.0;
    for mode in modes {
        let mu = &mode.mean;
        let denom = mu[0] * mu[0] + mu[1] * mu[1] + mu[2] * mu[2];
        if denom > 0.0 {
            let numer = sample[0] * mu[0] + sample[1] * mu[1] + sample[2] * mu[2];
            let a = numer / denom;
            if a <= 1.0 && a >= params.shadow_threshold {
                let mut dist2a = 0.0;
                for c in 0..3 {
                    let d = a * mu[c] - sample[c];
                    dist2a += d * d;
                }
                if dist2a < params.var_threshold * mode.var * a * a {
                    return true;
                }
            }
        }

        cumulative += mode.weight;
        if cumulative > params.background_ratio {
            break;
        }
    }
    false
}
