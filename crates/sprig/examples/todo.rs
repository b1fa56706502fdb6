//! Example: the todo list, driven by simulated input

use sprig::todo::{app, todo_app};
use sprig::{Config, IdleLoop, Runtime};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG=sprig_core=debug to watch commits)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let config = Config::default();
    let mut runtime = Runtime::new(config.clone());
    let mut idle = IdleLoop::new(&config);

    println!("sprig v{}", sprig::VERSION);

    let app = app();
    runtime.render(todo_app(&app, "My todos"));
    idle.run_until(&mut runtime, |rt| !rt.has_pending_work())?;

    for text in ["buy milk", "walk the dog", "write docs"] {
        let doc = runtime.document_mut();
        let input = doc
            .get_elements_by_tag_name("input")
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no input rendered"))?;
        let form = doc
            .get_elements_by_tag_name("form")
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no form rendered"))?;

        doc.set_value(input, text)?;
        doc.fire(input, "input")?;
        idle.run_until(&mut runtime, |rt| !rt.has_pending_work())?;

        runtime.document().fire(form, "submit")?;
        idle.run_until(&mut runtime, |rt| !rt.has_pending_work())?;
    }

    println!("{}", runtime.document().body_html());
    println!("{} idle ticks", idle.ticks());
    Ok(())
}
