//! Type declarations and capability classification.
//!
//! A [`TypeDeclaration`] lists the capabilities one type implements. The
//! typed builder returned by [`TypeDeclaration::of`] bounds each method on
//! the matching trait, so a declaration can only claim capabilities the
//! compiler has verified.

use super::{
    HandlerDescriptor, Request, RequestDescriptor, RequestHandler, TypeKey, VoidRequest,
    VoidRequestHandler,
};
use std::marker::PhantomData;

/// Whether a declared type can be instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// A concrete type; visited during discovery.
    Concrete,
    /// An abstract, interface-only declaration; skipped during discovery.
    Abstract,
}

/// A capability implemented by a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredCapability {
    /// "Is a request producing `result`."
    Request {
        /// Result type produced by the handler.
        result: TypeKey,
    },
    /// "Is a request with no result."
    VoidRequest,
    /// "Handles `request` producing `result`."
    Handler {
        /// Request type handled.
        request: TypeKey,
        /// Result type produced.
        result: TypeKey,
    },
    /// "Handles void `request`."
    VoidHandler {
        /// Request type handled.
        request: TypeKey,
    },
    /// Any capability unrelated to dispatch.
    Other(TypeKey),
}

/// A declared type with the capabilities it implements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    ty: TypeKey,
    kind: DeclarationKind,
    capabilities: Vec<DeclaredCapability>,
}

impl TypeDeclaration {
    /// Starts a declaration for `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use switchboard::mediator::domain::{Request, TypeDeclaration, classify};
    ///
    /// struct Ping;
    /// impl Request for Ping {
    ///     type Response = u32;
    /// }
    ///
    /// let declaration: TypeDeclaration = TypeDeclaration::of::<Ping>().request().into();
    /// assert_eq!(classify(&declaration).requests().len(), 1);
    /// ```
    #[must_use]
    pub fn of<T: 'static>() -> DeclarationBuilder<T> {
        DeclarationBuilder {
            declaration: Self {
                ty: TypeKey::of::<T>(),
                kind: DeclarationKind::Concrete,
                capabilities: Vec::new(),
            },
            _type: PhantomData,
        }
    }

    /// Returns the declared type.
    #[must_use]
    pub const fn ty(&self) -> TypeKey {
        self.ty
    }

    /// Returns whether the type is concrete or abstract.
    #[must_use]
    pub const fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Returns the declared capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &[DeclaredCapability] {
        &self.capabilities
    }

    /// Returns whether discovery should visit this declaration.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        self.kind == DeclarationKind::Concrete
    }

    /// Folds the capabilities of another declaration of the same type into
    /// this one.
    pub(crate) fn merge(&mut self, other: Self) {
        if other.kind == DeclarationKind::Abstract {
            self.kind = DeclarationKind::Abstract;
        }
        for capability in other.capabilities {
            self.push(capability);
        }
    }

    fn push(&mut self, capability: DeclaredCapability) {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
    }
}

/// Typed builder for a [`TypeDeclaration`] of `T`.
#[derive(Debug)]
pub struct DeclarationBuilder<T> {
    declaration: TypeDeclaration,
    _type: PhantomData<fn() -> T>,
}

impl<T: 'static> DeclarationBuilder<T> {
    /// Declares `T` as a result-bearing request.
    #[must_use]
    pub fn request(mut self) -> Self
    where
        T: Request,
    {
        self.declaration.push(DeclaredCapability::Request {
            result: TypeKey::of::<T::Response>(),
        });
        self
    }

    /// Declares `T` as a void request.
    #[must_use]
    pub fn void_request(mut self) -> Self
    where
        T: VoidRequest,
    {
        self.declaration.push(DeclaredCapability::VoidRequest);
        self
    }

    /// Declares `T` as a handler of the result-bearing request `Q`.
    #[must_use]
    pub fn handles<Q: Request>(mut self) -> Self
    where
        T: RequestHandler<Q>,
    {
        self.declaration.push(DeclaredCapability::Handler {
            request: TypeKey::of::<Q>(),
            result: TypeKey::of::<Q::Response>(),
        });
        self
    }

    /// Declares `T` as a handler of the void request `Q`.
    #[must_use]
    pub fn handles_void<Q: VoidRequest>(mut self) -> Self
    where
        T: VoidRequestHandler<Q>,
    {
        self.declaration.push(DeclaredCapability::VoidHandler {
            request: TypeKey::of::<Q>(),
        });
        self
    }

    /// Records a capability unrelated to dispatch.
    #[must_use]
    pub fn implements<M: ?Sized + 'static>(mut self) -> Self {
        self.declaration
            .push(DeclaredCapability::Other(TypeKey::of::<M>()));
        self
    }

    /// Marks the declaration as abstract so discovery skips it.
    #[must_use]
    pub const fn abstract_only(mut self) -> Self {
        self.declaration.kind = DeclarationKind::Abstract;
        self
    }

    /// Finishes the declaration.
    #[must_use]
    pub fn build(self) -> TypeDeclaration {
        self.declaration
    }
}

impl<T> From<DeclarationBuilder<T>> for TypeDeclaration {
    fn from(builder: DeclarationBuilder<T>) -> Self {
        builder.declaration
    }
}

/// Descriptors emitted for one declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    requests: Vec<RequestDescriptor>,
    handlers: Vec<HandlerDescriptor>,
}

impl Classification {
    /// Returns the request descriptors the type declares.
    #[must_use]
    pub fn requests(&self) -> &[RequestDescriptor] {
        &self.requests
    }

    /// Returns one handler descriptor per handled request.
    #[must_use]
    pub fn handlers(&self) -> &[HandlerDescriptor] {
        &self.handlers
    }

    /// Returns whether the type takes no part in dispatch.
    #[must_use]
    pub fn is_unrelated(&self) -> bool {
        self.requests.is_empty() && self.handlers.is_empty()
    }

    /// Splits the classification into its request and handler descriptors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<RequestDescriptor>, Vec<HandlerDescriptor>) {
        (self.requests, self.handlers)
    }
}

/// Classifies a declaration into request and handler descriptors.
///
/// Capabilities unrelated to dispatch are ignored. Abstract declarations are
/// classified like any other; skipping them is the scanner's concern.
#[must_use]
pub fn classify(declaration: &TypeDeclaration) -> Classification {
    let ty = declaration.ty();
    let mut classification = Classification::default();
    for capability in declaration.capabilities() {
        match *capability {
            DeclaredCapability::Request { result } => classification
                .requests
                .push(RequestDescriptor::new(ty, Some(result))),
            DeclaredCapability::VoidRequest => {
                classification.requests.push(RequestDescriptor::new(ty, None));
            }
            DeclaredCapability::Handler { request, result } => {
                classification.handlers.push(HandlerDescriptor::new(
                    ty,
                    RequestDescriptor::new(request, Some(result)),
                ));
            }
            DeclaredCapability::VoidHandler { request } => classification
                .handlers
                .push(HandlerDescriptor::new(ty, RequestDescriptor::new(request, None))),
            DeclaredCapability::Other(_) => {}
        }
    }
    classification
}
