// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! GTK application runtime.
//!
//! Opens one window holding a [`gtk::GLArea`], loads GL function
//! pointers on realize and redraws the preset on every frame tick.

use function_name::named;
use gtk::{gdk, glib, prelude::*};
use owo_colors::OwoColorize;
use std::sync::Once;

use shaderkit::{GlBackend, Shader};

use crate::{cli::CliConfig, viewer::*, *};

/// Ensures that GL function pointers are only loaded once.
static LOAD_GL: Once = Once::new();

/// Global application state stored on the [`gtk::Application`].
pub struct AppData {
    pub cli_config: CliConfig,
}

/// Per-area rendering state attached to the `GLArea`.
#[derive(Default)]
pub struct AreaData {
    /// Created on realize, dropped on unrealize while the context is current.
    pub viewer: Option<Viewer>,

    /// Framebuffer size in device pixels, as reported by `resize`.
    pub size: (i32, i32),
}

pub fn run(cli_config: CliConfig) -> glib::ExitCode {
    let app = gtk::Application::builder().application_id(APP_ID).build();

    set_data!(app, AppData { cli_config });

    app.connect_activate(activate);
    // Arguments were already parsed by clap.
    app.run_with_args(&[""])
}

#[named]
fn activate(app: &gtk::Application) {
    log::debug!("{}", function_name!().white().bold());

    let app_data = get_data!(app, AppData, as_ref());
    let name = &app_data.cli_config.preset.name;
    let title = if name.is_empty() {
        format!("{APP_NAME} {APP_SEMVER}")
    } else {
        format!("{name} - {APP_NAME} {APP_SEMVER}")
    };

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .name(APP_NAME)
        .title(title)
        .default_width(800)
        .default_height(600)
        .width_request(320)
        .height_request(240)
        .build();

    let area = setup_area();
    set_data!(
        area,
        AreaData {
            viewer: None,
            size: (0, 0),
        }
    );

    window.set_child(Some(&area));
    window.present();
}

fn setup_area() -> gtk::GLArea {
    let area = gtk::GLArea::new();

    area.set_required_version(GL_VERSION.0, GL_VERSION.1);
    area.set_has_depth_buffer(false);
    area.set_has_stencil_buffer(false);
    area.set_auto_render(false);

    area.connect_realize(on_realize);
    area.connect_unrealize(on_unrealize);
    area.connect_resize(on_resize);
    area.connect_render(on_render);

    area.add_tick_callback(|area, _| {
        area.queue_render();
        glib::ControlFlow::Continue
    });

    area
}

/// Loads GL, checks shader support and builds the viewer.
#[named]
fn on_realize(area: &gtk::GLArea) {
    log::debug!("{}", function_name!().white().bold());

    if let Some(err) = area.error() {
        log::error!("{err}");
        let (major, minor) = area.required_version();
        log::error!("OpenGL {major}.{minor} required");
        std::process::exit(1);
    }

    let Some(gl_context) = area.context() else {
        log::error!("Failed to get GL context");
        std::process::exit(1);
    };
    gl_context.make_current();

    LOAD_GL.call_once(|| {
        if let Err(err) = load_gl_functions() {
            log::error!("Failed to load GL functions: {err}");
            std::process::exit(1);
        }
        log_context_info(&gl_context);

        #[cfg(debug_assertions)]
        shaderkit::backend::check_gl_error::setup_opengl_debugging();
    });

    if !Shader::is_available(&GlBackend) {
        log::error!("Shaders are not supported by this OpenGL context");
        std::process::exit(1);
    }

    unsafe { gl::ClearColor(0.0, 0.0, 0.0, 1.0) };

    let Some(app) = app_from_area(area) else {
        log::error!("GL area is not attached to an application window");
        return;
    };
    let preset = &get_data!(app, AppData, as_ref()).cli_config.preset;

    match Viewer::new(preset) {
        Ok(viewer) => get_data!(area, AreaData, as_mut()).viewer = Some(viewer),
        Err(err) => {
            log::error!("Failed to create viewer: {err}");
            std::process::exit(1);
        }
    }
}

/// Releases GL objects while their context is still current.
#[named]
fn on_unrealize(area: &gtk::GLArea) {
    log::debug!("{}", function_name!().white().bold());

    area.make_current();
    get_data!(area, AreaData, as_mut()).viewer = None;
}

#[derive(Debug, thiserror::Error)]
enum GlLoadError {
    #[error("Failed to open libepoxy: {0}")]
    Library(#[from] libloading::Error),

    #[error("glGetString is unavailable after loading")]
    NotLoaded,
}

/// Resolves `gl` function pointers through libepoxy's dispatch table.
fn load_gl_functions() -> Result<(), GlLoadError> {
    let epoxy_lib = unsafe { libloading::os::unix::Library::new("libepoxy.so.0")? };

    epoxy::load_with(|symbol| {
        unsafe { epoxy_lib.get::<_>(symbol.as_bytes()) }
            .map(|ptr| *ptr)
            .unwrap_or(std::ptr::null())
    });
    gl::load_with(epoxy::get_proc_addr);

    if unsafe { gl::GetString(gl::VERSION) }.is_null() {
        return Err(GlLoadError::NotLoaded);
    }
    Ok(())
}

fn log_context_info(gl_context: &gdk::GLContext) {
    let (major, minor) = gl_context.version();
    log::debug!("GL context {major}.{minor}");

    for (label, name) in [
        ("Renderer", gl::RENDERER),
        ("GLSL", gl::SHADING_LANGUAGE_VERSION),
    ] {
        let ptr = unsafe { gl::GetString(name) };
        if ptr.is_null() {
            log::warn!("{label}: unknown");
            continue;
        }
        let value = unsafe { std::ffi::CStr::from_ptr(ptr as *const _) };
        log::debug!("{label}: {}", value.to_string_lossy());
    }
}

#[named]
fn on_resize(area: &gtk::GLArea, width: i32, height: i32) {
    log::debug!("{} {width}x{height}", function_name!().white().bold());

    get_data!(area, AreaData, as_mut()).size = (width, height);
}

#[named]
fn on_render(area: &gtk::GLArea, gl_context: &gdk::GLContext) -> glib::Propagation {
    gl_context.make_current();

    let area_data = get_data!(area, AreaData, as_mut());
    let (width, height) = area_data.size;

    log::trace!("{} {width}x{height}", function_name!().white().bold());

    if let Some(viewer) = area_data.viewer.as_mut() {
        viewer.render(width, height);
    }

    glib::Propagation::Stop
}

/// Gets the application from a [`gtk::GLArea`] placed in a [`gtk::Window`].
fn app_from_area(area: &gtk::GLArea) -> Option<gtk::Application> {
    area.root()
        .and_downcast::<gtk::Window>()
        .and_then(|window| window.application())
}

/// Attaches `TypeName { .. }` to a [`glib::Object`] under the key `"TypeName"`.
#[macro_export]
macro_rules! set_data {
    ($obj:expr, $ty:ident { $($fields:tt)* }) => {
        unsafe { $obj.set_data(stringify!($ty), $ty { $($fields)* }) }
    };
}

/// Borrows data attached with [`set_data!`]; panics when it is missing.
#[macro_export]
macro_rules! get_data {
    ($obj:expr, $ty:ty, $($tail:tt)+) => {
        unsafe {
            $obj.data::<$ty>(stringify!($ty))
                .unwrap_or_else(|| panic!("{} is not attached", stringify!($ty)))
                .$($tail)+
        }
    };
}
