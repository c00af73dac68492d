use crate::{
    codec::LinkCodec,
    core::{escape_quoted, pct_encode},
    types::{Link, Links, Param, ParamDefaults},
};

/// Encoder.
///
/// Implemented for types that know how to encode a specific message.
pub trait Encoder {
    type Message;

    /// Encode this message.
    ///
    /// This will return a header value, i.e., the part after `Link:`.
    fn encode(&self, message: &Self::Message) -> String;
}

impl Encoder for LinkCodec {
    type Message = Links;

    fn encode(&self, message: &Self::Message) -> String {
        let mut encode_context = EncodeContext::new(self.defaults());
        message.encode_ctx(&mut encode_context);

        encode_context.into_string()
    }
}

//--------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct EncodeContext<'a> {
    defaults: &'a ParamDefaults,
    accumulator: String,
}

impl<'a> EncodeContext<'a> {
    pub fn new(defaults: &'a ParamDefaults) -> Self {
        Self {
            defaults,
            accumulator: String::new(),
        }
    }

    pub fn push_str(&mut self, data: &str) {
        self.accumulator.push_str(data);
    }

    pub fn into_string(self) -> String {
        self.accumulator
    }
}

pub(crate) trait EncodeIntoContext {
    fn encode_ctx(&self, ctx: &mut EncodeContext);
}

impl EncodeIntoContext for Links {
    fn encode_ctx(&self, ctx: &mut EncodeContext) {
        for (index, link) in self.iter().enumerate() {
            if index > 0 {
                ctx.push_str(", ");
            }

            link.encode_ctx(ctx);
        }
    }
}

impl EncodeIntoContext for Link {
    fn encode_ctx(&self, ctx: &mut EncodeContext) {
        ctx.push_str("<");
        ctx.push_str(self.uri());
        ctx.push_str(">");

        for (name, param) in self.params() {
            ctx.push_str("; ");
            (name.as_str(), param).encode_ctx(ctx);
        }
    }
}

impl EncodeIntoContext for (&str, &Param) {
    fn encode_ctx(&self, ctx: &mut EncodeContext) {
        let (name, param) = *self;

        // `name*=` is read back as the extended parameter `name`, so a name ending in `*` needs
        // the extended form to keep its `*`.
        let is_plain = param.value().is_ascii()
            && param.encoding() == ctx.defaults.encoding
            && param.language() == ctx.defaults.language
            && !name.ends_with('*');

        ctx.push_str(name);

        if is_plain {
            ctx.push_str("=\"");
            ctx.push_str(&escape_quoted(param.value()));
            ctx.push_str("\"");
        } else {
            ctx.push_str("*=");
            ctx.push_str(param.encoding());
            ctx.push_str("'");
            ctx.push_str(param.language());
            ctx.push_str("'");
            ctx.push_str(&pct_encode(param.value()));
        }
    }
}
