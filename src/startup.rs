//! Registration hooks collected across the whole program.
//!
//! Any module, in any crate linked into the program, can contribute
//! registrations with [`register_factory!`](crate::register_factory) without
//! being listed anywhere. The hooks run once, the first time a process-wide
//! factory is queried, or earlier if the host calls
//! [`install_startup_hooks`] itself.
//!
//! Hooks must only register. Querying a factory from inside a hook would
//! wait on the installation that is running it, so it panics instead.

use std::cell::Cell;
use std::sync::Once;

use tracing::{debug, info};

/// A deferred registration submitted at link time.
pub struct StartupHook {
    name: &'static str,
    install: fn(),
}

impl StartupHook {
    /// Create a hook. `const` so it can be used with `inventory::submit!`.
    pub const fn new(name: &'static str, install: fn()) -> Self {
        Self { name, install }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the hook's registrations.
    pub fn run(&self) {
        (self.install)()
    }
}

impl std::fmt::Debug for StartupHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartupHook")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

inventory::collect!(StartupHook);

static INSTALL: Once = Once::new();

thread_local! {
    static INSTALLING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as running hooks until dropped.
struct Installing;

impl Installing {
    fn enter() -> Self {
        INSTALLING.with(|flag| flag.set(true));
        Installing
    }
}

impl Drop for Installing {
    fn drop(&mut self) {
        INSTALLING.with(|flag| flag.set(false));
    }
}

/// Run every submitted hook, once per process.
///
/// Returns the number of hooks run by this call: the total on the call that
/// performs the installation, `0` on every later one. Other threads calling
/// in while installation runs wait for it to finish.
///
/// # Panics
///
/// Panics when called from inside a hook, which includes any factory query
/// or production made by a hook. Installation is then abandoned and every
/// later factory query panics as well.
///
/// # Deadlocks
///
/// Hooks take factory write locks. Calling this while the current thread
/// holds a guard from one of those factories' `table()` never returns.
pub fn install_startup_hooks() -> usize {
    install_from(&INSTALL, inventory::iter::<StartupHook>)
}

fn install_from<'a>(once: &Once, hooks: impl IntoIterator<Item = &'a StartupHook>) -> usize {
    if INSTALLING.with(Cell::get) {
        panic!("a startup hook queried a factory; hooks may only register");
    }

    let mut installed = 0;
    once.call_once(|| {
        let _installing = Installing::enter();
        for hook in hooks {
            debug!("Running startup hook {}", hook.name);
            hook.run();
            installed += 1;
        }
        info!("Installed {} startup registration hooks", installed);
    });
    installed
}

/// Whether the hooks have been installed.
pub fn startup_hooks_installed() -> bool {
    INSTALL.is_completed()
}

/// All submitted hooks. Order is unspecified.
pub fn startup_hooks() -> impl Iterator<Item = &'static StartupHook> {
    inventory::iter::<StartupHook>.into_iter()
}

/// Register a constructor with a process-wide factory from any module.
///
/// The registration is deferred to [`install_startup_hooks`], which runs
/// automatically before the first production. The entry and its hook are
/// named `<module>::<predicate> => <constructor>`, so the same pair
/// submitted twice from one module is a duplicate while distinct pairs
/// never collide.
///
/// # Panics
///
/// Registering never panics; a duplicate name is handled by the factory's
/// [`DuplicatePolicy`](crate::config::DuplicatePolicy). Hook installation
/// itself panics if a hook queries a factory, see [`install_startup_hooks`].
///
/// # Deadlocks
///
/// Hooks install on the first factory query. A thread that holds a guard
/// from this factory's [`table`](crate::factory::SelectiveFactory::table)
/// and then makes that first query blocks forever when the hook takes the
/// write lock. Call [`install_startup_hooks`] early in `main` to rule this
/// out.
///
/// ```
/// use selective_factory::{register_factory, SelectiveFactory};
///
/// pub trait Codec {
///     fn name(&self) -> &'static str;
/// }
/// struct Gzip;
/// impl Codec for Gzip {
///     fn name(&self) -> &'static str { "gzip" }
/// }
///
/// fn is_gzip(ext: &&'static str) -> bool { *ext == "gz" }
/// fn make_gzip(_: ()) -> Box<dyn Codec> { Box::new(Gzip) }
///
/// register_factory!(SelectiveFactory<dyn Codec, &'static str>, is_gzip => make_gzip);
///
/// let codec = SelectiveFactory::<dyn Codec, &'static str>::produce_one(&"gz", ());
/// assert_eq!(codec.map(|c| c.name()), Some("gzip"));
/// ```
#[macro_export]
macro_rules! register_factory {
    ($factory:ty, $predicate:path => $constructor:path $(,)?) => {
        const _: () = {
            fn __install() {
                let _ = <$factory>::register_named(
                    concat!(
                        module_path!(),
                        "::",
                        stringify!($predicate),
                        " => ",
                        stringify!($constructor)
                    ),
                    $predicate,
                    $constructor,
                );
            }

            $crate::inventory::submit! {
                $crate::startup::StartupHook::new(
                    concat!(
                        module_path!(),
                        "::",
                        stringify!($predicate),
                        " => ",
                        stringify!($constructor)
                    ),
                    __install,
                )
            }
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::SelectiveFactory;

    trait Greeter {
        fn greet(&self) -> String;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    fn wants_hello(lang: &char) -> bool {
        *lang == 'e'
    }

    fn make_hello(_: ()) -> Box<dyn Greeter> {
        Box::new(Hello)
    }

    crate::register_factory!(SelectiveFactory<dyn Greeter, char>, wants_hello => make_hello);

    #[test]
    fn submitted_hook_is_listed() {
        let names: Vec<_> = startup_hooks().map(|h| h.name()).collect();
        assert!(names
            .iter()
            .any(|n| n.ends_with("::wants_hello => make_hello")));
    }

    #[test]
    fn install_runs_hooks_once() {
        install_startup_hooks();
        assert!(startup_hooks_installed());
        assert_eq!(install_startup_hooks(), 0);
        assert_eq!(SelectiveFactory::<dyn Greeter, char>::len(), 1);
    }

    #[test]
    fn hook_registrations_are_produced_without_explicit_install() {
        let greeter = SelectiveFactory::<dyn Greeter, char>::produce_one(&'e', ());
        assert_eq!(greeter.map(|g| g.greet()), Some("hello".to_string()));
        assert!(SelectiveFactory::<dyn Greeter, char>::produce_one(&'f', ()).is_none());
    }

    #[test]
    fn hook_entry_is_named_after_module_and_pair() {
        install_startup_hooks();
        let expected = concat!(module_path!(), "::wants_hello => make_hello");
        assert_eq!(
            SelectiveFactory::<dyn Greeter, char>::names(),
            vec![expected.to_string()]
        );
        assert!(SelectiveFactory::<dyn Greeter, char>::contains(expected));
    }

    fn noop() {}

    #[test]
    fn install_from_runs_each_hook_once() {
        static ONCE: Once = Once::new();
        let hooks = [StartupHook::new("a", noop), StartupHook::new("b", noop)];

        assert_eq!(install_from(&ONCE, &hooks), 2);
        assert_eq!(install_from(&ONCE, &hooks), 0);
        assert!(!INSTALLING.with(Cell::get));
    }

    static NESTED: Once = Once::new();

    fn queries_during_install() {
        install_from(&NESTED, std::iter::empty());
    }

    #[test]
    #[should_panic(expected = "hooks may only register")]
    fn hook_that_queries_a_factory_panics_instead_of_hanging() {
        let hook = StartupHook::new("queries_during_install", queries_during_install);
        install_from(&NESTED, [&hook]);
    }
}
