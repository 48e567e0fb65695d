//! End-to-end: file input → proxy point → ordered file outputs.

use lcx_io::{
    BufferedOutputConsumer, FileInputProvider, InputProvider, IoConfig, IoError, OutputConsumer,
    OutputDispatcher,
};
use lcx_proxy::testing::MockInterceptor;
use lcx_proxy::{ParamType, ParamValue, ProxyError, ProxyPoint};
use lcx_types::Order;
use std::path::Path;
use std::sync::atomic::Ordering;
use tempfile::TempDir;

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

/// Point taking one `String`, with an interceptor that trims it and one
/// that skips inputs starting with `#`.
fn echo_point() -> ProxyPoint {
    let mut point = ProxyPoint::new("echo", vec![ParamType::of::<String>()]);
    point.chain_mut().register(Box::new(
        MockInterceptor::modifier("trim", |p| {
            if let Some(s) = p.get::<String>(0)?.cloned() {
                p.set(0, s.trim().to_string())?;
            }
            Ok(())
        })
        .with_order(10),
    ));
    point.chain_mut().register(Box::new(MockInterceptor::modifier("skip-comments", |p| {
        if p.get::<String>(0)?.is_some_and(|s| s.starts_with('#')) {
            p.clear(0)?;
        }
        Ok(())
    })));
    point
}

fn run(
    point: &ProxyPoint,
    input: &mut impl InputProvider,
    outputs: &mut OutputDispatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    while let Some(line) = input.next_input()? {
        let out = point.invoke(Some(vec![Some(ParamValue::new(line))]), |p| {
            Ok(p.get::<String>(0)?.map(|s| s.to_uppercase()))
        })?;
        outputs.dispatch(out.as_deref())?;
    }
    input.close()?;
    outputs.close_all()?;
    Ok(())
}

#[test]
fn file_to_files_through_proxy_point() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("in.txt");
    std::fs::write(&input_path, "  hello \r\n# note\n\nworld\n").unwrap();
    let primary = dir.path().join("primary.txt");
    let audit = dir.path().join("audit.txt");
    std::fs::write(&audit, "previous\n").unwrap();

    let mut input = FileInputProvider::open(&input_path).unwrap();
    let mut outputs = OutputDispatcher::new();
    outputs.register(Box::new(BufferedOutputConsumer::create(&primary).unwrap()));
    outputs.register(Box::new(
        BufferedOutputConsumer::append(&audit).unwrap().with_order(5),
    ));

    run(&echo_point(), &mut input, &mut outputs).unwrap();

    // Comments and blank lines produce no output line anywhere.
    assert_eq!(read(&primary), "HELLO\nWORLD\n");
    assert_eq!(read(&audit), "previous\nHELLO\nWORLD\n");
    assert_eq!(outputs.orders(), vec![5, 0]);
}

#[test]
fn consume_hello_writes_one_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.txt");

    let mut out = BufferedOutputConsumer::create(&path).unwrap();
    out.consume(Some("hello")).unwrap();
    // Flushed per line: readable before close.
    assert_eq!(read(&path), "hello\n");
    out.consume(None).unwrap();
    out.consume(Some("")).unwrap();
    out.close().unwrap();
    out.close().unwrap();
    assert_eq!(read(&path), "hello\n");
    assert!(matches!(out.consume(Some("late")), Err(IoError::Closed)));
}

#[test]
fn consumers_run_by_priority_then_registration() {
    let dir = TempDir::new().unwrap();
    // All four append to the same file, so the line order is the call order.
    let shared = dir.path().join("shared.txt");

    let mut outputs = OutputDispatcher::new();
    for (tag, order) in [("p5a", 5), ("p1", 1), ("p5b", 5), ("p0", 0)] {
        let consumer = BufferedOutputConsumer::append(&shared)
            .unwrap()
            .with_order(order);
        assert_eq!(consumer.order(), order);
        outputs.register(Box::new(Tagged { tag, inner: consumer }));
    }

    outputs.dispatch(Some("x")).unwrap();
    outputs.close_all().unwrap();
    assert_eq!(read(&shared), "p5a:x\np5b:x\np1:x\np0:x\n");
}

struct Tagged<C> {
    tag: &'static str,
    inner: C,
}

impl<C: Order> Order for Tagged<C> {
    fn order(&self) -> i32 {
        self.inner.order()
    }
}

impl<C: OutputConsumer> OutputConsumer for Tagged<C> {
    fn consume(&mut self, output: Option<&str>) -> Result<(), IoError> {
        match output.filter(|t| !t.is_empty()) {
            Some(text) => self.inner.consume(Some(&format!("{}:{text}", self.tag))),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> Result<(), IoError> {
        self.inner.close()
    }
}

#[test]
fn aborting_interceptor_skips_call_and_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.txt");

    let mut point = ProxyPoint::new("guarded", vec![ParamType::of::<String>()]);
    let guard = MockInterceptor::aborter("guard", "read-only").with_order(1);
    let guard_calls = guard.call_count.clone();
    point.chain_mut().register(Box::new(guard));

    let mut outputs = OutputDispatcher::new();
    outputs.register(Box::new(BufferedOutputConsumer::create(&path).unwrap()));

    let mut input = FileInputProvider::from_reader(&b"a\nb\n"[..]);
    let mut called = 0;
    while let Some(line) = input.next_input().unwrap() {
        let result = point.invoke(Some(vec![Some(ParamValue::new(line))]), |_| {
            called += 1;
            Ok("never")
        });
        match result {
            Ok(out) => outputs.dispatch(Some(out)).unwrap(),
            Err(ProxyError::Aborted { interceptor, .. }) => assert_eq!(interceptor, "guard"),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    outputs.close_all().unwrap();

    assert_eq!(called, 0);
    assert_eq!(guard_calls.load(Ordering::SeqCst), 2);
    assert_eq!(read(&path), "");
}

#[test]
fn config_file_drives_adapters() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("in.txt");
    std::fs::write(&input_path, "one\ntwo\n").unwrap();
    let out_path = dir.path().join("out.txt");

    let config_path = dir.path().join("lcx.toml");
    std::fs::write(
        &config_path,
        format!(
            "[input]\npath = {:?}\n\n[[outputs]]\ntarget = \"file\"\npath = {:?}\norder = 2\n",
            input_path.display().to_string(),
            out_path.display().to_string(),
        ),
    )
    .unwrap();

    let config = IoConfig::load(&config_path).unwrap();

    let mut input = config.build_input().unwrap().expect("input configured");
    let mut outputs = config.build_dispatcher().unwrap();
    assert_eq!(outputs.orders(), vec![2]);

    run(&echo_point(), &mut input, &mut outputs).unwrap();
    assert_eq!(read(&out_path), "ONE\nTWO\n");
}
