/// A sidebar shortcut that sends a canned prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topic {
    pub name: &'static str,
    pub prompt: &'static str,
}

pub const TOPICS: [Topic; 4] = [
    Topic {
        name: "Market Analysis",
        prompt: "Provide a market analysis for a new coffee shop in a bustling downtown area.",
    },
    Topic {
        name: "Financial Projections",
        prompt: "Generate 3-year financial projections for a SaaS startup with a $10/month subscription model.",
    },
    Topic {
        name: "Brand Strategy",
        prompt: "Develop a brand strategy for a new line of eco-friendly cleaning products.",
    },
    Topic {
        name: "Startup Pitch",
        prompt: "Create a concise startup pitch for an AI-powered language learning app.",
    },
];
