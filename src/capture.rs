//! Webcam capture feeding the motion sensor.
//!
//! The video stream is drawn into a tiny offscreen 2D canvas each animation
//! frame; the RGBA pixels go through [`MotionSensor`] and the input-stage
//! [`Smoother`] into the shared [`TensionSignal`]. This loop is independent of
//! the render loop.

use crate::constants::*;
use crate::overlay;
use anyhow::anyhow;
use biolumen_core::{MotionSensor, SensorStatus, Smoother, TensionSignal, SENSOR_SMOOTHING_ALPHA};
use js_sys::{Object, Reflect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns the camera stream and the sampling loop. Dropping it cancels the
/// pending animation frame and stops every track.
pub struct CaptureHandle {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
    sensor: Rc<RefCell<MotionSensor>>,
    tick: Tick,
    raf_id: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.stopped.set(true);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's self-reference
        self.tick.borrow_mut().take();
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
        self.sensor.borrow_mut().shutdown();
        log::info!("[camera] capture released");
    }
}

/// Request the camera and start sampling. Failures are reported to the
/// overlay and leave the sensor permanently unavailable; tension then
/// stays at its last value.
pub async fn start(document: web::Document, tension: TensionSignal) -> Option<CaptureHandle> {
    let sensor = Rc::new(RefCell::new(MotionSensor::default()));
    overlay::set_camera_status(&document, SensorStatus::Idle);

    let stream = match open_stream().await {
        Ok(s) => s,
        Err(status) => {
            sensor.borrow_mut().mark_unavailable(status);
            overlay::set_camera_status(&document, status);
            return None;
        }
    };

    match start_sampling(&document, stream.clone(), sensor.clone(), tension).await {
        Ok(handle) => {
            overlay::set_camera_status(&document, SensorStatus::Active);
            log::info!("[camera] linked");
            Some(handle)
        }
        Err(e) => {
            log::error!("[camera] sampling setup failed: {e:#}");
            for track in stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                    track.stop();
                }
            }
            sensor.borrow_mut().mark_unavailable(SensorStatus::Error);
            overlay::set_camera_status(&document, SensorStatus::Error);
            None
        }
    }
}

async fn open_stream() -> Result<web::MediaStream, SensorStatus> {
    let devices = web::window()
        .ok_or_else(|| anyhow!("no window"))
        .and_then(|w| w.navigator().media_devices().map_err(js_err));
    let devices = match devices {
        Ok(d) => d,
        Err(e) => {
            log::warn!("[camera] media devices unavailable: {e:#}");
            return Err(SensorStatus::Error);
        }
    };

    let video = Object::new();
    _ = Reflect::set(&video, &"width".into(), &CAPTURE_WIDTH.into());
    _ = Reflect::set(&video, &"height".into(), &CAPTURE_HEIGHT.into());
    _ = Reflect::set(&video, &"frameRate".into(), &CAPTURE_FRAME_RATE.into());
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::FALSE);
    constraints.set_video(&video);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| {
            log::warn!("[camera] getUserMedia rejected: {:?}", e);
            SensorStatus::Error
        })?;
    match JsFuture::from(promise).await {
        Ok(v) => v.dyn_into::<web::MediaStream>().map_err(|_| SensorStatus::Error),
        Err(e) => {
            let name = Reflect::get(&e, &"name".into())
                .ok()
                .and_then(|n| n.as_string())
                .unwrap_or_default();
            log::warn!("[camera] access failed: {name} {:?}", e);
            Err(match name.as_str() {
                "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
                    SensorStatus::Denied
                }
                _ => SensorStatus::Error,
            })
        }
    }
}

async fn start_sampling(
    document: &web::Document,
    stream: web::MediaStream,
    sensor: Rc<RefCell<MotionSensor>>,
    tension: TensionSignal,
) -> anyhow::Result<CaptureHandle> {
    let video: web::HtmlVideoElement = document
        .create_element("video")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    video.set_muted(true);
    _ = video.set_attribute("playsinline", "");
    video.set_src_object(Some(&stream));
    JsFuture::from(video.play().map_err(js_err)?)
        .await
        .map_err(js_err)?;

    let (w, h) = {
        let s = sensor.borrow();
        (s.width(), s.height())
    };
    let sample_canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    sample_canvas.set_width(w);
    sample_canvas.set_height(h);
    let opts = Object::new();
    _ = Reflect::set(&opts, &"willReadFrequently".into(), &JsValue::TRUE);
    let ctx: web::CanvasRenderingContext2d = sample_canvas
        .get_context_with_context_options("2d", &opts)
        .map_err(js_err)?
        .ok_or_else(|| anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;

    let tick: Tick = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    let stopped = Rc::new(Cell::new(false));

    let mut smoother = Smoother::new(SENSOR_SMOOTHING_ALPHA);
    let tick_next = tick.clone();
    let raf_next = raf_id.clone();
    let stopped_tick = stopped.clone();
    let video_tick = video.clone();
    let sensor_tick = sensor.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if stopped_tick.get() {
            return;
        }
        if video_tick.ready_state() >= VIDEO_HAVE_ENOUGH_DATA {
            match sample_frame(&ctx, &video_tick, w, h) {
                Ok(rgba) => match sensor_tick.borrow_mut().process(&rgba) {
                    Ok(activity) => tension.set(smoother.update(activity)),
                    Err(e) => log::warn!("[camera] {e}"),
                },
                Err(e) => log::warn!("[camera] sample failed: {e:#}"),
            }
        }
        request_frame(&tick_next, &raf_next);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);

    Ok(CaptureHandle {
        stream,
        video,
        sensor,
        tick,
        raf_id,
        stopped,
    })
}

fn sample_frame(
    ctx: &web::CanvasRenderingContext2d,
    video: &web::HtmlVideoElement,
    w: u32,
    h: u32,
) -> anyhow::Result<Vec<u8>> {
    ctx.draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, w as f64, h as f64)
        .map_err(js_err)?;
    let data = ctx
        .get_image_data(0.0, 0.0, w as f64, h as f64)
        .map_err(js_err)?;
    Ok(data.data().0)
}

fn request_frame(tick: &Tick, raf_id: &Rc<Cell<Option<i32>>>) {
    let Some(w) = web::window() else {
        return;
    };
    let tick = tick.borrow();
    if let Some(cb) = tick.as_ref() {
        if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            raf_id.set(Some(id));
        }
    }
}
