//! Minimal end-to-end demo: declare a counter, register it, drive it.
//!
//! Run with: cargo run --example counter

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use castellan_engine::{
    arg, bind, AttributeMarker, ClassDecl, ClassRegistry, Impact, LocalBeanServer, ManagedValue,
    Management, MethodDecl, OperationMarker, TypeRegistry,
};

#[derive(Default)]
struct Counter {
    value: AtomicI32,
}

impl Counter {
    fn value(&self) -> i32 {
        self.value.load(Ordering::SeqCst)
    }

    fn set_value(&self, value: i32) {
        self.value.store(value, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.value.store(0, Ordering::SeqCst);
    }
}

fn counter_class() -> ClassDecl {
    ClassDecl::new::<Counter>("Counter")
        .describe("A demo counter")
        .method(
            MethodDecl::new(
                "getValue",
                bind(|c: &Counter, _args: &[ManagedValue]| Ok(ManagedValue::I32(c.value()))),
            )
            .returns("i32")
            .attribute(AttributeMarker::new().describe("current count")),
        )
        .method(
            MethodDecl::new(
                "setValue",
                bind(|c: &Counter, args: &[ManagedValue]| {
                    c.set_value(arg(args, 0)?);
                    Ok(ManagedValue::Unit)
                }),
            )
            .param("i32"),
        )
        .method(
            MethodDecl::new(
                "reset",
                bind(|c: &Counter, _args: &[ManagedValue]| {
                    c.reset();
                    Ok(ManagedValue::Unit)
                }),
            )
            .operation(OperationMarker::new().impact(Impact::Action).describe("reset to zero")),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let classes = Arc::new(ClassRegistry::new());
    classes.register(counter_class());

    let server = Arc::new(LocalBeanServer::new());
    let management = Management::new(
        classes,
        Arc::new(TypeRegistry::with_defaults()),
        server.clone(),
    );

    management.register(Arc::new(Counter::default()), "org.demo:type=Counter")?;

    let bean = server
        .lookup("org.demo:type=Counter")
        .ok_or("bean not registered")?;

    println!("descriptor: {}", serde_json::to_string_pretty(bean.info())?);

    bean.set_attribute("value", ManagedValue::I32(41))?;
    println!("value = {:?}", bean.get_attribute("value")?.as_i32());

    bean.invoke("reset", &[], &[])?;
    println!("after reset = {:?}", bean.get_attribute("value")?.as_i32());

    management.unregister("org.demo:type=Counter")?;
    Ok(())
}
