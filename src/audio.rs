use sand_core::{AudioBackend, FilterKind, Patch, SandError, SandResult};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// A playing `source -> filter -> gain -> destination` chain.
pub struct WebVoice {
    source: web::AudioBufferSourceNode,
    filter: web::BiquadFilterNode,
    gain: web::GainNode,
}

/// WebAudio backend. The context is created lazily on the first sound
/// (inside a user gesture, so autoplay policy lets it run) and reused for
/// the lifetime of the page.
#[derive(Default)]
pub struct WebAudio {
    ctx: Option<web::AudioContext>,
}

fn node_err(what: &str, e: wasm_bindgen::JsValue) -> SandError {
    SandError::AudioNode(format!("{}: {:?}", what, e))
}

impl WebAudio {
    fn ctx(&self) -> SandResult<&web::AudioContext> {
        self.ctx
            .as_ref()
            .ok_or_else(|| SandError::AudioUnavailable("no context".into()))
    }
}

impl AudioBackend for WebAudio {
    type Voice = WebVoice;

    fn wake(&mut self) -> SandResult<()> {
        if self.ctx.is_none() {
            let ctx = web::AudioContext::new()
                .map_err(|e| SandError::AudioUnavailable(format!("{:?}", e)))?;
            log::info!("[audio] context created at {} Hz", ctx.sample_rate());
            self.ctx = Some(ctx);
        }
        let ctx = self.ctx()?;
        if ctx.state() == web::AudioContextState::Suspended {
            if let Ok(promise) = ctx.resume() {
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("[audio] resume rejected: {:?}", e);
                    }
                });
            }
        }
        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.ctx.as_ref().map(|c| c.sample_rate()).unwrap_or(44_100.0)
    }

    fn current_time(&self) -> f64 {
        self.ctx.as_ref().map(|c| c.current_time()).unwrap_or(0.0)
    }

    fn start_voice(&mut self, patch: Patch) -> SandResult<WebVoice> {
        let ctx = self.ctx()?;
        let Patch {
            mut samples,
            looping,
            filter: spec,
            gain: level,
            stop_at,
        } = patch;

        let buffer = ctx
            .create_buffer(1, samples.len() as u32, ctx.sample_rate())
            .map_err(|e| node_err("AudioBuffer", e))?;
        buffer
            .copy_to_channel(&mut samples, 0)
            .map_err(|e| node_err("copyToChannel", e))?;

        let source = ctx
            .create_buffer_source()
            .map_err(|e| node_err("AudioBufferSourceNode", e))?;
        source.set_buffer(Some(&buffer));
        source.set_loop(looping);

        let filter = ctx
            .create_biquad_filter()
            .map_err(|e| node_err("BiquadFilterNode", e))?;
        filter.set_type(match spec.kind {
            FilterKind::LowPass => web::BiquadFilterType::Lowpass,
            FilterKind::BandPass => web::BiquadFilterType::Bandpass,
        });
        filter.frequency().set_value(spec.frequency_hz);
        filter.q().set_value(spec.q);

        let gain = ctx.create_gain().map_err(|e| node_err("GainNode", e))?;
        gain.gain().set_value(level);

        _ = source.connect_with_audio_node(&filter);
        _ = filter.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&ctx.destination());

        source.start().map_err(|e| node_err("start", e))?;
        if let Some(t) = stop_at {
            _ = source.stop_with_when(t);
        }
        Ok(WebVoice {
            source,
            filter,
            gain,
        })
    }

    fn ramp_gain(&mut self, voice: &WebVoice, target: f32, end_time: f64) {
        let now = self.current_time();
        let param = voice.gain.gain();
        // Anchor the ramp at the current value so it starts from here.
        _ = param.cancel_scheduled_values(now);
        _ = param.set_value_at_time(param.value(), now);
        _ = param.linear_ramp_to_value_at_time(target, end_time);
    }

    fn stop_voice(&mut self, voice: WebVoice) -> SandResult<()> {
        let stopped = voice.source.stop().map_err(|e| node_err("stop", e));
        _ = voice.source.disconnect();
        _ = voice.filter.disconnect();
        _ = voice.gain.disconnect();
        stopped
    }
}

impl Drop for WebAudio {
    fn drop(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            _ = ctx.close();
        }
    }
}
