//! Integration tests for proxy points.
//!
//! Interceptors discovered through a bean registry, ordered, configured
//! from TOML, and dispatched over a real call.

use lcx_proxy::{
    InterceptAction, InterceptorsConfig, ParamType, ParamValue, ParameterView, ProxyError,
    ProxyPoint, ProxyPointInterceptor,
};
use lcx_types::{BeanRegistry, Order};
use parking_lot::Mutex;
use std::sync::Arc;

/// Interceptor that records its ID and rewrites the string slot.
struct Tag {
    id: &'static str,
    order: i32,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl Order for Tag {
    fn order(&self) -> i32 {
        self.order
    }
}

impl ProxyPointInterceptor for Tag {
    fn id(&self) -> &str {
        self.id
    }

    fn intercept(&self, params: &mut ParameterView) -> Result<InterceptAction, ProxyError> {
        self.log.lock().push(self.id);
        let current = params.get::<String>(0)?.cloned().unwrap_or_default();
        params.set(0, format!("{current}{}", self.id))?;
        Ok(InterceptAction::Continue)
    }
}

fn registry(log: &Arc<Mutex<Vec<&'static str>>>) -> BeanRegistry<Box<dyn ProxyPointInterceptor>> {
    let mut reg: BeanRegistry<Box<dyn ProxyPointInterceptor>> = BeanRegistry::new();
    for (id, order) in [("a", 5), ("b", 1), ("c", 5), ("d", 0)] {
        let log = Arc::clone(log);
        reg.register("app::interceptors", id, move || {
            Box::new(Tag {
                id,
                order,
                log: Arc::clone(&log),
            }) as Box<dyn ProxyPointInterceptor>
        })
        .expect("unique bean");
    }
    reg
}

fn point_from(reg: &BeanRegistry<Box<dyn ProxyPointInterceptor>>) -> ProxyPoint {
    let mut point = ProxyPoint::new(
        "concat",
        vec![ParamType::of::<String>(), ParamType::of::<i32>()],
    );
    for interceptor in reg
        .collect_all("app::interceptors", |_| true)
        .expect("valid namespace")
    {
        point.chain_mut().register(interceptor);
    }
    point
}

fn call_args() -> Option<Vec<Option<ParamValue>>> {
    Some(vec![
        Some(ParamValue::new(String::new())),
        Some(ParamValue::new(5_i32)),
    ])
}

fn real_call(params: ParameterView) -> Result<String, ProxyError> {
    let s = params.get::<String>(0)?.cloned().unwrap_or_default();
    let n = params.get::<i32>(1)?.copied().unwrap_or(0);
    Ok(format!("{s}:{n}"))
}

#[test]
fn discovered_interceptors_run_in_priority_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let point = point_from(&registry(&log));

    let out = point.invoke(call_args(), real_call).expect("call succeeds");

    assert_eq!(out, "acbd:5");
    assert_eq!(*log.lock(), vec!["a", "c", "b", "d"]);
}

#[test]
fn config_reorders_and_disables() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut point = point_from(&registry(&log));

    let config = InterceptorsConfig::from_toml(
        r#"
[[interceptors]]
id = "d"
order = 100

[[interceptors]]
id = "c"
enabled = false
"#,
    )
    .expect("valid config");
    point.chain_mut().apply_config(&config);

    let out = point.invoke(call_args(), real_call).expect("call succeeds");
    assert_eq!(out, "dab:5");
}

#[test]
fn interceptor_type_error_surfaces_to_caller() {
    struct Widen;
    impl Order for Widen {
        fn order(&self) -> i32 {
            i32::MAX
        }
    }
    impl ProxyPointInterceptor for Widen {
        fn id(&self) -> &str {
            "widen"
        }
        fn intercept(&self, params: &mut ParameterView) -> Result<InterceptAction, ProxyError> {
            let n = params.get::<i32>(1)?.copied().unwrap_or(0);
            params.set(1, i64::from(n))?;
            Ok(InterceptAction::Continue)
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut point = point_from(&registry(&log));
    point.chain_mut().register(Box::new(Widen));

    let err = point.invoke(call_args(), real_call).unwrap_err();
    assert_eq!(
        err,
        ProxyError::TypeMismatch {
            pos: 1,
            expected: "i32",
            actual: "i64",
        }
    );
    assert!(log.lock().is_empty());
}

#[test]
fn absent_values_flow_to_real_call() {
    let point = ProxyPoint::new(
        "optional",
        vec![ParamType::of::<String>(), ParamType::of::<i32>()],
    );
    let out = point
        .invoke(Some(vec![None, None]), real_call)
        .expect("absent values are legal");
    assert_eq!(out, ":0");
}
