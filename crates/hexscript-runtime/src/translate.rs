//! Guest class to pattern declaration translation.
//!
//! The translator never touches the guest object model directly. It asks a
//! [`ClassReflector`] four questions (instantiate this class, does this
//! instance directly extend the marker, what is its type called, what are its
//! members) and builds a [`Declaration`] from the answers.

use hexscript_sdk::{Declaration, DeclarationKind, HostError, HostResult, TypeDescriptor};

/// Name of the marker class, as shown in error messages.
pub const MARKER_NAME: &str = "HexType";

/// The slice of a guest runtime's object model the translator relies on.
pub trait ClassReflector {
    /// A class reference as passed in by the guest
    type Class;
    /// An instance of a class
    type Instance;

    /// Instantiate `class` with no constructor arguments.
    fn instantiate(&self, class: &Self::Class) -> HostResult<Self::Instance>;

    /// Whether the instance's immediate base class is the marker.
    fn extends_marker(&self, instance: &Self::Instance) -> bool;

    /// Name of the instance's class.
    fn type_name(&self, instance: &Self::Instance) -> HostResult<String>;

    /// The instance's class members, in declaration order.
    ///
    /// A class without member annotations is an argument error.
    fn members(&self, instance: &Self::Instance) -> HostResult<Vec<(String, Self::Class)>>;
}

/// Build a struct or union declaration from a guest class.
///
/// Either every member checks out and the full declaration is returned, or
/// nothing is.
pub fn translate<R: ClassReflector>(
    reflector: &R,
    kind: DeclarationKind,
    class: &R::Class,
) -> HostResult<Declaration> {
    let op = op_name(kind);

    let instance = reflector.instantiate(class)?;
    if !reflector.extends_marker(&instance) {
        return Err(HostError::Type(format!(
            "{}: class must extend {}",
            op, MARKER_NAME
        )));
    }

    let mut descriptor = TypeDescriptor::new(reflector.type_name(&instance)?);

    for (name, member_class) in reflector.members(&instance)? {
        let not_bridgeable = || {
            HostError::Type(format!(
                "{}: member '{}' of {} needs an annotation extending {}",
                op, name, descriptor.type_name, MARKER_NAME
            ))
        };

        let member = reflector
            .instantiate(&member_class)
            .map_err(|_| not_bridgeable())?;
        if !reflector.extends_marker(&member) {
            return Err(not_bridgeable());
        }

        let type_name = reflector.type_name(&member)?;
        descriptor.push(name, type_name);
    }

    log::debug!(
        "translated {} {} with {} members",
        kind,
        descriptor.type_name,
        descriptor.members.len()
    );
    Ok(Declaration::new(kind, descriptor))
}

/// Host call that requested a declaration of this kind
pub fn op_name(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Struct => "add_struct",
        DeclarationKind::Union => "add_union",
    }
}
