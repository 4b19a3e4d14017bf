use std::panic;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(inline_js = "export function get_stack() { return new Error().stack; }")]
extern "C" {
    fn get_stack() -> String;
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn error(msg: &str);
}

/// Panic hook that logs the panic message together with a JS stack
/// trace to `console.error`, so crashes inside spawned guard
/// evaluations and fetch futures stay visible in the browser console.
///
/// On non-wasm targets, prints the panic to `stderr`.
pub fn hook(info: &panic::PanicHookInfo) {
    #[cfg(target_arch = "wasm32")]
    {
        let msg = format!("{}\n\nStack:\n\n{}\n\n", info, get_stack());
        error(&msg);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", info);
    }
}

/// Registers the hook as soon as the WASM module is instantiated,
/// before `main` runs.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    panic::set_hook(Box::new(hook));
}
