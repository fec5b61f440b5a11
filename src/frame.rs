use crate::constants::METER_EPSILON;
use crate::overlay;
use crate::render;
use biolumen_core::{
    AnimationDriver, OrbitCamera, Specimen, TensionSignal, AUTO_ROTATE_MAX_TENSION,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub specimen: Rc<RefCell<Specimen>>,
    pub tension: TensionSignal,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub driver: AnimationDriver,

    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    /// Field generation currently resident on the GPU.
    pub uploaded_generation: Option<u64>,
    pub last_meter: f32,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let raw_tension = self.tension.get();
        let specimen = self.specimen.borrow();
        let uniforms = self.driver.advance(dt_sec, raw_tension, specimen.config());

        let camera = {
            let mut orbit = self.orbit.borrow_mut();
            orbit.update(dt_sec, raw_tension < AUTO_ROTATE_MAX_TENSION);
            let aspect = self.canvas.width().max(1) as f32 / self.canvas.height().max(1) as f32;
            orbit.camera(aspect)
        };

        if (raw_tension - self.last_meter).abs() > METER_EPSILON {
            overlay::set_tension_meter(&self.document, raw_tension);
            self.last_meter = raw_tension;
        }

        let Some(g) = &mut self.gpu else {
            return;
        };
        if self.uploaded_generation != Some(specimen.generation()) {
            g.upload_field(specimen.field());
            self.uploaded_generation = Some(specimen.generation());
        }
        drop(specimen);

        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        match g.render(&uniforms, &camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_tick(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    let tick = tick.borrow();
    if let Some(cb) = tick.as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_tick(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_tick(&tick);
}
