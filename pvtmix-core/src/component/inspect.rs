use super::Component;

/// A wrapper that observes input and result without modifying behavior.
///
/// This struct is used internally by `.inspect()`.
pub(crate) struct Inspect<C, InputHandler, ResultHandler> {
    pub(crate) component: C,
    pub(crate) input_handler: InputHandler,
    pub(crate) result_handler: ResultHandler,
}

impl<C, InputHandler, ResultHandler> Component for Inspect<C, InputHandler, ResultHandler>
where
    C: Component,
    InputHandler: Fn(&C::Input),
    ResultHandler: Fn(&Result<C::Output, C::Error>),
{
    type Input = C::Input;
    type Output = C::Output;
    type Error = C::Error;

    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        (self.input_handler)(&input);
        let result = self.component.call(input);
        (self.result_handler)(&result);
        result
    }
}
