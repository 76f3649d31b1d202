//! Evaluation of declarations and expressions.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use lateinit_core::{QualifiedName, TypeHash};
use lateinit_ir::{
    BinaryOp, Callee, CompilationUnit, Constant, DeclId, DeclKind, ExprId, ExprKind,
};
use lateinit_registry::{SymbolRegistry, stdlib};

use crate::{Object, ObjectRef, RuntimeError, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Nested calls allowed before evaluation is aborted.
    pub max_call_depth: usize,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            max_call_depth: 256,
        }
    }
}

/// Non-local exits: `return` unwinds to its function, errors to the caller.
enum Unwind {
    Return(DeclId, Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(err: RuntimeError) -> Self {
        Unwind::Error(err)
    }
}

type Eval<T = Value> = Result<T, Unwind>;

struct Frame {
    function: DeclId,
    locals: FxHashMap<DeclId, Value>,
}

/// Evaluates functions of one unit against a library registry.
///
/// Static fields are initialized on first access and keep their values
/// across calls.
pub struct Interpreter<'a> {
    unit: &'a CompilationUnit,
    registry: &'a SymbolRegistry,
    options: InterpreterOptions,
    throw_uninitialized: Option<TypeHash>,
    statics: FxHashMap<DeclId, Value>,
    frames: Vec<Frame>,
    field_reads: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(unit: &'a CompilationUnit, registry: &'a SymbolRegistry) -> Self {
        Self::with_options(unit, registry, InterpreterOptions::default())
    }

    pub fn with_options(
        unit: &'a CompilationUnit,
        registry: &'a SymbolRegistry,
        options: InterpreterOptions,
    ) -> Self {
        let throw_uninitialized = registry
            .functions_named(&QualifiedName::from(stdlib::THROW_UNINITIALIZED))
            .first()
            .map(|f| f.hash);
        Self {
            unit,
            registry,
            options,
            throw_uninitialized,
            statics: FxHashMap::default(),
            frames: Vec::new(),
            field_reads: 0,
        }
    }

    /// Number of field loads performed so far, static or instance.
    pub fn field_reads(&self) -> usize {
        self.field_reads
    }

    /// Call a top-level function.
    pub fn call_function(
        &mut self,
        function: DeclId,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        self.invoke(function, None, None, args)
    }

    /// Call a member function on `receiver`.
    pub fn call_method(
        &mut self,
        function: DeclId,
        receiver: Value,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        self.invoke(function, Some(receiver), None, args)
    }

    /// Create an instance of `class`, running its field initializers.
    pub fn construct(&mut self, class: DeclId) -> Result<Value, RuntimeError> {
        self.instantiate(class).map_err(|unwind| match unwind {
            Unwind::Error(err) => err,
            Unwind::Return(function, _) => self.stray_return(function),
        })
    }

    fn invoke(
        &mut self,
        function: DeclId,
        this: Option<Value>,
        extension: Option<Value>,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        if self.frames.len() >= self.options.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                limit: self.options.max_call_depth,
            });
        }
        let unit = self.unit;
        let decl = unit.decl(function);
        let Some(f) = decl.as_function() else {
            return Err(RuntimeError::UnexpectedDeclaration {
                name: decl.name.clone(),
                expected: "function",
            });
        };
        if f.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                function: decl.name.clone(),
                expected: f.params.len(),
                found: args.len(),
            });
        }
        let Some(body) = f.body else {
            return Err(RuntimeError::NoBody {
                name: decl.name.clone(),
            });
        };
        trace!(function = %decl.name, depth = self.frames.len(), "call");

        let mut locals = FxHashMap::default();
        let receivers = [(f.dispatch_receiver, this), (f.extension_receiver, extension)];
        for (param, value) in receivers {
            if let (Some(param), Some(value)) = (param, value) {
                locals.insert(param, value);
            }
        }
        locals.extend(f.params.iter().copied().zip(args));

        self.frames.push(Frame { function, locals });
        let result = self.eval(body);
        self.frames.pop();

        match result {
            Ok(value) => Ok(value),
            Err(Unwind::Return(target, value)) if target == function => Ok(value),
            Err(Unwind::Return(target, _)) => Err(self.stray_return(target)),
            Err(Unwind::Error(err)) => Err(err),
        }
    }

    fn stray_return(&self, function: DeclId) -> RuntimeError {
        RuntimeError::UnexpectedDeclaration {
            name: self.unit.decl(function).name.clone(),
            expected: "function on the call stack",
        }
    }

    fn instantiate(&mut self, class: DeclId) -> Eval {
        let unit = self.unit;
        let decl = unit.decl(class);
        let Some(c) = decl.as_class() else {
            return Err(RuntimeError::UnexpectedDeclaration {
                name: decl.name.clone(),
                expected: "class",
            }
            .into());
        };
        let mut object = Object {
            class: Some(class),
            fields: FxHashMap::default(),
        };
        for &member in &c.members {
            let Some(field) = self.backing_field(member) else {
                continue;
            };
            if let Some(init) = unit.decl(field).as_field().and_then(|f| f.initializer) {
                let value = self.eval(init)?;
                object.fields.insert(field, value);
            }
        }
        Ok(Value::Object(Rc::new(RefCell::new(object))))
    }

    fn backing_field(&self, member: DeclId) -> Option<DeclId> {
        match &self.unit.decl(member).kind {
            DeclKind::Property(p) => p.backing_field,
            DeclKind::Field(_) => Some(member),
            _ => None,
        }
    }

    fn frame(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    fn eval(&mut self, id: ExprId) -> Eval {
        let unit = self.unit;
        let expr = unit.expr(id);
        match &expr.kind {
            ExprKind::Const(c) => Ok(match c {
                Constant::Null => Value::Null,
                Constant::Bool(b) => Value::Bool(*b),
                Constant::Int(i) => Value::Int(*i),
                Constant::Double(d) => Value::Double(d.into_inner()),
                Constant::Str(s) => Value::str(s),
            }),
            ExprKind::GetValue(decl) => self
                .frame()
                .and_then(|frame| frame.locals.get(decl).cloned())
                .ok_or_else(|| {
                    RuntimeError::UnboundValue {
                        name: unit.decl(*decl).name.clone(),
                    }
                    .into()
                }),
            ExprKind::SetValue { target, value } => {
                let value = self.eval(*value)?;
                if let Some(frame) = self.frame() {
                    frame.locals.insert(*target, value);
                }
                Ok(Value::Unit)
            }
            ExprKind::Declare(decl) => {
                let initializer = unit.decl(*decl).as_variable().and_then(|v| v.initializer);
                if let Some(init) = initializer {
                    let value = self.eval(init)?;
                    if let Some(frame) = self.frame() {
                        frame.locals.insert(*decl, value);
                    }
                }
                Ok(Value::Unit)
            }
            ExprKind::GetField { field, receiver } => {
                let receiver = receiver.map(|r| self.eval(r)).transpose()?;
                self.field_reads += 1;
                if self.unit.decl(*field).flags.is_static() {
                    return self.static_field(*field);
                }
                let object = self.instance(*field, receiver, "field read")?;
                let value = object.borrow().fields.get(field).cloned();
                Ok(value.unwrap_or(Value::Null))
            }
            ExprKind::SetField {
                field,
                receiver,
                value,
            } => {
                let receiver = receiver.map(|r| self.eval(r)).transpose()?;
                let value = self.eval(*value)?;
                if self.unit.decl(*field).flags.is_static() {
                    self.statics.insert(*field, value);
                } else {
                    let object = self.instance(*field, receiver, "field write")?;
                    object.borrow_mut().fields.insert(*field, value);
                }
                Ok(Value::Unit)
            }
            ExprKind::Call {
                callee,
                dispatch_receiver,
                extension_receiver,
                args,
            } => {
                let this = dispatch_receiver.map(|r| self.eval(r)).transpose()?;
                let extension = extension_receiver.map(|r| self.eval(r)).transpose()?;
                let args = args
                    .iter()
                    .map(|&a| self.eval(a))
                    .collect::<Result<Vec<_>, _>>()?;
                match callee {
                    Callee::Declared(function) => {
                        Ok(self.invoke(*function, this, extension, args)?)
                    }
                    Callee::Library(hash) => Err(self.library_call(*hash, args).into()),
                }
            }
            ExprKind::PropertyReference {
                property,
                dispatch_receiver,
                extension_receiver,
            } => {
                let receiver = dispatch_receiver.or(*extension_receiver);
                let receiver = receiver.map(|r| self.eval(r)).transpose()?;
                Ok(Value::PropertyRef {
                    property: *property,
                    receiver: receiver.map(Box::new),
                })
            }
            ExprKind::Block(stmts) => {
                let mut last = Value::Unit;
                for &stmt in stmts {
                    last = self.eval(stmt)?;
                }
                Ok(last)
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition = self.eval(*condition)?;
                let Some(taken) = condition.as_bool() else {
                    return Err(RuntimeError::TypeMismatch {
                        op: "if",
                        operands: condition.to_string(),
                    }
                    .into());
                };
                match (taken, else_branch) {
                    (true, _) => self.eval(*then_branch),
                    (false, Some(e)) => self.eval(*e),
                    (false, None) => Ok(Value::Unit),
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.eval(*lhs)?;
                let rhs = self.eval(*rhs)?;
                Ok(binary(*op, lhs, rhs)?)
            }
            ExprKind::Return { function, value } => {
                let value = match value {
                    Some(v) => self.eval(*v)?,
                    None => Value::Unit,
                };
                Err(Unwind::Return(*function, value))
            }
            ExprKind::Construct { class } => self.instantiate(*class),
        }
    }

    fn object(&self, value: Value, op: &'static str) -> Result<ObjectRef, RuntimeError> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(RuntimeError::TypeMismatch {
                op,
                operands: other.to_string(),
            }),
        }
    }

    /// The object an instance field access goes through.
    fn instance(
        &self,
        field: DeclId,
        receiver: Option<Value>,
        op: &'static str,
    ) -> Result<ObjectRef, RuntimeError> {
        match receiver {
            Some(object) => self.object(object, op),
            None => Err(RuntimeError::MissingReceiver {
                name: self.unit.decl(field).name.clone(),
            }),
        }
    }

    fn static_field(&mut self, field: DeclId) -> Eval {
        if let Some(value) = self.statics.get(&field) {
            return Ok(value.clone());
        }
        let initializer = self.unit.decl(field).as_field().and_then(|f| f.initializer);
        let value = match initializer {
            Some(init) => self.eval(init)?,
            None => Value::Null,
        };
        self.statics.insert(field, value.clone());
        Ok(value)
    }

    /// Library functions never return normally here: the throw function
    /// raises, everything else is unsupported.
    fn library_call(&self, hash: TypeHash, args: Vec<Value>) -> RuntimeError {
        if Some(hash) == self.throw_uninitialized {
            let name = args.first().and_then(Value::as_str).map(str::to_string);
            debug!(?name, "uninitialized property access");
            return RuntimeError::UninitializedPropertyAccess { name };
        }
        match self.registry.function(hash) {
            Some(f) if f.property.is_some() => RuntimeError::UnloweredIntrinsic {
                name: f.name.to_string(),
            },
            _ => RuntimeError::UnknownLibraryFunction(hash),
        }
    }
}

fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(lhs.equals(&rhs))),
        BinaryOp::Ne => Ok(Value::Bool(!lhs.equals(&rhs))),
        BinaryOp::Add => match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
            (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::str(format!("{a}{b}"))),
            (a, b) => Err(RuntimeError::TypeMismatch {
                op: op.symbol(),
                operands: format!("{a} and {b}"),
            }),
        },
    }
}
