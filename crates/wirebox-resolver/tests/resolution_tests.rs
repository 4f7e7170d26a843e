//! Resolution Tests
//!
//! End-to-end resolution over acyclic provider graphs: singleton
//! identity, fresh construction, depth-first dependency order, and the
//! full diamond-shaped dependency tree.

use std::sync::{Arc, Mutex};

use wirebox_domain::{DepList, Error, Instance, Provide, Result, Token};
use wirebox_resolver::{Registry, Scope, ScopeOptions};

struct A;
impl A {
    fn say(&self) -> String {
        "|".to_string()
    }
}
impl Provide for A {
    fn build(_deps: &mut DepList) -> Result<Self> {
        Ok(A)
    }
}

struct B {
    a: Arc<A>,
}
impl B {
    fn say(&self) -> String {
        format!("{}|", self.a.say())
    }
}
impl Provide for B {
    fn deps() -> Vec<Token> {
        vec![Token::of::<A>()]
    }
    fn build(deps: &mut DepList) -> Result<Self> {
        Ok(B {
            a: deps.take::<A>()?,
        })
    }
}

struct C {
    a: Arc<A>,
    b: Arc<B>,
}
impl C {
    fn say(&self) -> String {
        format!("{}|{}", self.a.say(), self.b.say())
    }
}
impl Provide for C {
    fn deps() -> Vec<Token> {
        vec![Token::of::<A>(), Token::of::<B>()]
    }
    fn build(deps: &mut DepList) -> Result<Self> {
        Ok(C {
            a: deps.take::<A>()?,
            b: deps.take::<B>()?,
        })
    }
}

struct D {
    a: Arc<A>,
    b: Arc<B>,
    c: Arc<C>,
}
impl D {
    fn say(&self) -> String {
        format!("{}|{}{}", self.a.say(), self.b.say(), self.c.say())
    }
}
impl Provide for D {
    fn deps() -> Vec<Token> {
        vec![Token::of::<A>(), Token::of::<B>(), Token::of::<C>()]
    }
    fn build(deps: &mut DepList) -> Result<Self> {
        Ok(D {
            a: deps.take::<A>()?,
            b: deps.take::<B>()?,
            c: deps.take::<C>()?,
        })
    }
}

struct E {
    d: Arc<D>,
}
impl E {
    fn say(&self) -> String {
        format!("{}|", self.d.say())
    }
}
impl Provide for E {
    fn deps() -> Vec<Token> {
        vec![Token::of::<D>()]
    }
    fn build(deps: &mut DepList) -> Result<Self> {
        Ok(E {
            d: deps.take::<D>()?,
        })
    }
}

fn full_registry() -> Registry {
    Registry::builder()
        .provide::<A>()
        .provide::<B>()
        .provide::<C>()
        .provide::<D>()
        .provide::<E>()
        .build()
}

#[test]
fn test_full_dependency_tree_resolves_to_nine_pipes() {
    let scope = Scope::root(full_registry(), ScopeOptions::new()).unwrap();

    let e = scope.get::<E>().unwrap();
    assert_eq!(e.say(), "|||||||||");
}

#[test]
fn test_repeated_get_returns_the_identical_instance() {
    let scope = Scope::root(full_registry(), ScopeOptions::new()).unwrap();

    let first = scope.get::<D>().unwrap();
    let second = scope.get::<D>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_shared_dependencies_resolve_to_one_singleton() {
    let scope = Scope::root(full_registry(), ScopeOptions::new()).unwrap();

    let d = scope.get::<D>().unwrap();
    let c = scope.get::<C>().unwrap();
    assert!(Arc::ptr_eq(&d.c, &c));
    assert!(Arc::ptr_eq(&d.a, &c.a));
}

#[test]
fn test_create_is_fresh_at_the_root_and_shared_below() {
    let scope = Scope::root(full_registry(), ScopeOptions::new()).unwrap();

    let cached = scope.get::<E>().unwrap();
    let fresh = scope.create::<E>().unwrap();
    assert!(!Arc::ptr_eq(&cached, &fresh));
    assert!(Arc::ptr_eq(&cached.d, &fresh.d));
}

#[test]
fn test_resolution_order_is_depth_first_in_declared_order() {
    struct Trunk;
    struct Left;
    struct Right;

    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let left_log = order.clone();
    let right_log = order.clone();
    let trunk_log = order.clone();

    let registry = Registry::builder()
        .factory(Token::of::<Left>(), Vec::new(), move |_| {
            left_log.lock().unwrap().push("left");
            let instance: Instance = Arc::new(Left);
            Ok(instance)
        })
        .factory(Token::of::<Right>(), Vec::new(), move |_| {
            right_log.lock().unwrap().push("right");
            let instance: Instance = Arc::new(Right);
            Ok(instance)
        })
        .factory(
            Token::of::<Trunk>(),
            vec![Token::of::<Left>(), Token::of::<Right>()],
            move |_| {
                trunk_log.lock().unwrap().push("trunk");
                let instance: Instance = Arc::new(Trunk);
                Ok(instance)
            },
        )
        .build();

    let scope = Scope::root(registry, ScopeOptions::new()).unwrap();
    scope.get_raw(Token::of::<Trunk>()).unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["left", "right", "trunk"]);
}

#[test]
fn test_unregistered_token_fails_with_unresolved_dependency() {
    struct Unregistered;

    let scope = Scope::root(full_registry(), ScopeOptions::new()).unwrap();
    let err = scope.get::<Unregistered>().err().expect("must be unresolved");

    match err {
        Error::UnresolvedDependency { token } => assert!(token.contains("Unregistered")),
        other => panic!("expected UnresolvedDependency, got {other:?}"),
    }
}
