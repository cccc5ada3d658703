//! Interactive demo: window + event dispatch + triggers
//!
//! Opens a window, feeds its raw events through the device collector, and
//! logs every trigger signal. Escape quits.

use std::time::Instant;

use tracing::{info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use tidepool::config::FrameworkConfig;
use tidepool::device::{DeviceCollector, window_attributes_from_config};
use tidepool::event::{EventManager, Key, PointerButton, RegisteredHandler};
use tidepool::input::{KeyPressTrigger, PointerButtonTrigger, TriggerSet};

struct Demo {
    config: FrameworkConfig,
    window: Option<Window>,
    manager: EventManager,
    collector: DeviceCollector,
    triggers: RegisteredHandler<TriggerSet>,
    last_update: Option<Instant>,
}

impl Demo {
    fn new(config: FrameworkConfig) -> Self {
        let manager = EventManager::new();
        let ctx = manager.context();

        let mut set = TriggerSet::new();
        set.bind("jump", Box::new(KeyPressTrigger::new(Key::Space)));
        set.bind("quit", Box::new(KeyPressTrigger::new(Key::Escape)));
        set.bind(
            "click",
            Box::new(PointerButtonTrigger::new(PointerButton::Left)),
        );
        if let Some(path) = &config.input.bindings {
            if let Err(e) = set.restore_from_file(path) {
                warn!(error = %e, "falling back to default bindings");
            }
        }

        let triggers = RegisteredHandler::new(&ctx, set);
        let collector = DeviceCollector::new(ctx);

        Self {
            config,
            window: None,
            manager,
            collector,
            triggers,
            last_update: None,
        }
    }
}

impl ApplicationHandler for Demo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = window_attributes_from_config(&self.config.window);
            match event_loop.create_window(attrs) {
                Ok(window) => {
                    self.collector.set_scale_factor(window.scale_factor() as f32);
                    window.request_redraw();
                    self.window = Some(window);
                }
                Err(e) => {
                    warn!(error = %e, "failed to create window");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.collector.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = self
                    .last_update
                    .map(|t| now.duration_since(t).as_secs_f64())
                    .unwrap_or(1.0 / 60.0);
                self.last_update = Some(now);

                self.manager.dispatch_tick(dt);

                for signal in self.triggers.borrow_mut().take_fired() {
                    info!(name = %signal.name, value = signal.param.value, "trigger fired");
                    if signal.name == "quit" {
                        event_loop.exit();
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = FrameworkConfig::load_from_env().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        FrameworkConfig::default()
    });
    info!(profile = %config.profile, "starting demo");

    let event_loop = EventLoop::new().expect("failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut demo = Demo::new(config);
    event_loop
        .run_app(&mut demo)
        .expect("failed to run event loop");

    drop(demo.triggers);
    demo.manager.finalize();
}
