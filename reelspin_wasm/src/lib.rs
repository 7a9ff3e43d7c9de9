use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use reelspin_core::surface::{GLYPH_FONT, GUIDE_LINE_COLOR, GUIDE_LINE_WIDTH};
use reelspin_core::{MachineConfig, PositionSeed, ReelAnimator, ResultReporter, Surface, LANES};
use reelspin_shared::Outcome;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn draw_glyph(&mut self, glyph: &str, x: f64, y: f64) {
        if let Err(e) = self.ctx.fill_text(glyph, x, y) {
            tracing::warn!(?e, glyph, "fill_text failed");
        }
    }

    fn draw_guide_line(&mut self, y: f64, width: f64) {
        let ctx = self.ctx;
        ctx.begin_path();
        ctx.set_stroke_style(&JsValue::from_str(GUIDE_LINE_COLOR));
        ctx.set_line_width(GUIDE_LINE_WIDTH);
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
        ctx.stroke();
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

fn draw_frame(
    canvas: &NodeRef,
    machine: &RefCell<ReelAnimator>,
    reporter: &RefCell<ResultReporter>,
    on_outcome: &Callback<Outcome>,
) {
    let Some(ctx) = canvas.cast::<HtmlCanvasElement>().as_ref().and_then(context_2d) else {
        return;
    };
    // resizing the canvas resets its text state
    ctx.set_font(GLYPH_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let report = machine.borrow_mut().tick(&mut CanvasSurface { ctx: &ctx });
    if let Some(outcome) = reporter.borrow_mut().observe(report.outcome.as_ref()) {
        on_outcome.emit(outcome.clone());
    }
}

/// Queue the next frame; each frame queues its successor until the slot is emptied.
fn schedule_frame(
    slot: FrameSlot,
    canvas: NodeRef,
    machine: Rc<RefCell<ReelAnimator>>,
    reporter: Rc<RefCell<ResultReporter>>,
    on_outcome: Callback<Outcome>,
) {
    let next = slot.clone();
    let handle = request_animation_frame(move |_| {
        draw_frame(&canvas, &machine, &reporter, &on_outcome);
        schedule_frame(next, canvas, machine, reporter, on_outcome);
    });
    *slot.borrow_mut() = Some(handle);
}

fn fit_to_window(canvas: &NodeRef, machine: &RefCell<ReelAnimator>) {
    let (Some(window), Some(canvas)) = (web_sys::window(), canvas.cast::<HtmlCanvasElement>())
    else {
        return;
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    let mut machine = machine.borrow_mut();
    let height = machine.layout().canvas_height;
    match machine.resize(width, height) {
        Ok(()) => canvas.set_width(width as u32),
        Err(e) => tracing::warn!(%e, "resize ignored"),
    }
}

fn new_machine() -> ReelAnimator {
    let seed = PositionSeed::new("reelspin-web", js_sys::Date::now() as u64);
    ReelAnimator::seeded(MachineConfig::default(), &seed).expect("default config is valid")
}

#[function_component(App)]
fn app() -> Html {
    let machine = use_mut_ref(new_machine);
    let reporter = use_mut_ref(ResultReporter::default);
    let result = use_state(|| None as Option<Outcome>);
    let canvas_ref = use_node_ref();

    {
        let machine = machine.clone();
        let reporter = reporter.clone();
        let canvas_ref = canvas_ref.clone();
        let on_outcome = {
            let result = result.clone();
            Callback::from(move |o: Outcome| result.set(Some(o)))
        };
        use_effect_with((), move |_| {
            let slot: FrameSlot = Rc::new(RefCell::new(None));
            fit_to_window(&canvas_ref, &machine);
            schedule_frame(
                slot.clone(),
                canvas_ref.clone(),
                machine.clone(),
                reporter,
                on_outcome,
            );
            let resize = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_| {
                    fit_to_window(&canvas_ref, &machine);
                })
            });
            move || {
                slot.borrow_mut().take();
                drop(resize);
            }
        });
    }

    let buttons = (0..LANES).map(|lane| {
        let machine = machine.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            if let Err(e) = machine.borrow_mut().stop(lane) {
                tracing::warn!(%e, "stop ignored");
            }
        });
        html! { <button {onclick}>{format!("Stop {}", lane + 1)}</button> }
    });

    let (width, height) = {
        let m = machine.borrow();
        (m.layout().canvas_width, m.layout().canvas_height)
    };

    html! {
        <div class="reelspin">
            <canvas ref={canvas_ref} width={width.to_string()} height={height.to_string()}></canvas>
            <div class="controls">{ for buttons }</div>
            if let Some(res) = &*result {
                <p class="result">{ res.message.clone() }</p>
            }
        </div>
    }
}

#[wasm_bindgen(start)]
pub fn run() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    yew::Renderer::<App>::new().render();
}
