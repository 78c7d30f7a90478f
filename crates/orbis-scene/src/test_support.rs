//! Headless device for GPU tests. Returns `None` when no adapter exists.

pub(crate) fn create_test_device() -> Option<wgpu::Device> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .ok()?;
        let (device, _queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .ok()?;
        Some(device)
    })
}

/// Helpers for asserting on the naga IR of the scene shaders.
pub(crate) mod ir {
    use wgpu::naga::{self, BinaryOperator, Expression, Handle, Literal, MathFunction};

    pub(crate) fn entry_function<'a>(module: &'a naga::Module, name: &str) -> &'a naga::Function {
        &module
            .entry_points
            .iter()
            .find(|ep| ep.name == name)
            .unwrap()
            .function
    }

    /// Scalar components of a module-scope constant, flattened in order.
    pub(crate) fn constant_components(module: &naga::Module, name: &str) -> Vec<f32> {
        let (_, constant) = module
            .constants
            .iter()
            .find(|(_, c)| c.name.as_deref() == Some(name))
            .unwrap();
        let mut out = Vec::new();
        flatten_global(module, constant.init, &mut out);
        out
    }

    fn flatten_global(module: &naga::Module, handle: Handle<Expression>, out: &mut Vec<f32>) {
        match &module.global_expressions[handle] {
            Expression::Literal(Literal::F32(v)) => out.push(*v),
            Expression::Compose { components, .. } => {
                for &component in components {
                    flatten_global(module, component, out);
                }
            }
            Expression::Splat { size, value } => {
                for _ in 0..*size as u8 {
                    flatten_global(module, *value, out);
                }
            }
            Expression::Constant(c) => flatten_global(module, module.constants[*c].init, out),
            other => panic!("unexpected constant expression {other:?}"),
        }
    }

    /// Scalar value of a function expression that is a literal or a named
    /// scalar constant.
    pub(crate) fn scalar(
        module: &naga::Module,
        function: &naga::Function,
        handle: Handle<Expression>,
    ) -> Option<f32> {
        match &function.expressions[handle] {
            Expression::Literal(Literal::F32(v)) => Some(*v),
            Expression::Constant(c) => match module.global_expressions[module.constants[*c].init] {
                Expression::Literal(Literal::F32(v)) => Some(v),
                _ => None,
            },
            _ => None,
        }
    }

    /// `bias - dot(..)` with the given bias.
    pub(crate) fn has_bias_minus_dot(
        module: &naga::Module,
        function: &naga::Function,
        bias: f32,
    ) -> bool {
        function.expressions.iter().any(|(_, expr)| match expr {
            Expression::Binary {
                op: BinaryOperator::Subtract,
                left,
                right,
            } => {
                scalar(module, function, *left) == Some(bias)
                    && matches!(
                        function.expressions[*right],
                        Expression::Math {
                            fun: MathFunction::Dot,
                            ..
                        }
                    )
            }
            _ => false,
        })
    }

    /// `pow(.., exponent)`.
    pub(crate) fn has_pow(module: &naga::Module, function: &naga::Function, exponent: f32) -> bool {
        function.expressions.iter().any(|(_, expr)| match expr {
            Expression::Math {
                fun: MathFunction::Pow,
                arg1: Some(arg1),
                ..
            } => scalar(module, function, *arg1) == Some(exponent),
            _ => false,
        })
    }

    /// `x * x` for some `x`.
    pub(crate) fn has_square(function: &naga::Function) -> bool {
        function.expressions.iter().any(|(_, expr)| {
            matches!(
                expr,
                Expression::Binary { op: BinaryOperator::Multiply, left, right } if left == right
            )
        })
    }

    /// A composed vector whose last component is `w`.
    pub(crate) fn has_compose_with_w(
        module: &naga::Module,
        function: &naga::Function,
        w: f32,
    ) -> bool {
        function.expressions.iter().any(|(_, expr)| match expr {
            Expression::Compose { components, .. } => components
                .last()
                .is_some_and(|&last| scalar(module, function, last) == Some(w)),
            _ => false,
        })
    }
}
