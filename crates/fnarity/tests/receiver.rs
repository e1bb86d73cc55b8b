//! Dispatchers used as methods: the receiver is passed through to the handler untouched.

use std::{cell::Cell, sync::Arc, thread};

use fnarity::{BoxedHandler, Dispatcher, Object, ResolvedRecord};
use pretty_assertions::assert_eq;

struct Greeter {
    greeting: String,
    calls: Cell<usize>,
}

impl Greeter {
    fn greet(&self, args: ResolvedRecord) -> String {
        self.calls.set(self.calls.get() + 1);
        let name = args.get("name").map(ToString::to_string).unwrap_or_default();
        let punct = args.get("punct").map(ToString::to_string).unwrap_or_default();
        format!("{}, {name}{punct}", self.greeting)
    }
}

#[test]
fn receiver_state_reaches_the_handler() {
    let greet = Dispatcher::builder()
        .params(["name"])
        .defaults([("punct", "!")])
        .params(["name", "punct"])
        .handler(Greeter::greet)
        .build()
        .unwrap();

    let hello = Greeter {
        greeting: "Hello".to_owned(),
        calls: Cell::new(0),
    };
    let hi = Greeter {
        greeting: "Hi".to_owned(),
        calls: Cell::new(0),
    };

    assert_eq!(greet.call(&hello, ["Ada"]).unwrap(), "Hello, Ada!");
    assert_eq!(greet.call(&hi, ["Bob", "?"]).unwrap(), "Hi, Bob?");
    assert_eq!(hello.calls.get(), 1);
    assert_eq!(hi.calls.get(), 1);
}

#[test]
fn rejected_call_never_reaches_the_handler() {
    let greet = Dispatcher::builder()
        .params(["name"])
        .handler(Greeter::greet)
        .build()
        .unwrap();
    let hello = Greeter {
        greeting: "Hello".to_owned(),
        calls: Cell::new(0),
    };

    assert!(greet.call(&hello, ["a", "b"]).unwrap_err().is_unsupported_arity());
    assert_eq!(hello.calls.get(), 0);
}

#[test]
fn unsized_receiver() {
    let prefix = Dispatcher::builder()
        .params(["a"])
        .handler(|s: &str, args: ResolvedRecord| format!("{s}{}", args.get("a").unwrap()))
        .build()
        .unwrap();

    assert_eq!(prefix.call("> ", ["x"]).unwrap(), "> x");
}

#[test]
fn boxed_handlers_share_one_type() {
    fn n(args: &ResolvedRecord) -> i64 {
        i64::try_from(args.get("n").unwrap()).unwrap()
    }
    let double: BoxedHandler<(), i64> = Box::new(|_: &(), args: ResolvedRecord| 2 * n(&args));
    let negate: BoxedHandler<(), i64> = Box::new(|_: &(), args: ResolvedRecord| -n(&args));

    let table: Vec<Dispatcher<BoxedHandler<(), i64>>> = [double, negate]
        .into_iter()
        .map(|handler| Dispatcher::builder().params(["n"]).handler(handler).build().unwrap())
        .collect();

    let results: Vec<i64> = table.iter().map(|f| f.call(&(), [21]).unwrap()).collect();
    assert_eq!(results, vec![42, -21]);
}

#[test]
fn dispatcher_is_shared_across_threads() {
    let sum = Arc::new(
        Dispatcher::builder()
            .params(["a"])
            .defaults([("b", 100)])
            .params(["a", "b..."])
            .handler(|_: &(), args: ResolvedRecord| {
                let a = i64::try_from(args.get("a").unwrap()).unwrap();
                let b = match args.get("b").unwrap() {
                    Object::List(items) => items.iter().map(|v| i64::try_from(v).unwrap()).sum::<i64>(),
                    other => i64::try_from(other).unwrap(),
                };
                a + b
            })
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4_i64)
        .map(|i| {
            let sum = Arc::clone(&sum);
            thread::spawn(move || (sum.call(&(), [i]).unwrap(), sum.call(&(), [i, 1, 2]).unwrap()))
        })
        .collect();
    for (i, handle) in (0..4_i64).zip(handles) {
        assert_eq!(handle.join().unwrap(), (i + 100, i + 3));
    }
}
