//! Visitor-facing copy for the barbershop promotion.

pub const TITLE: &str = "🎯 Roleta da Barbearia";
pub const TAGLINE: &str = "Gire a roleta e ganhe prêmios incríveis!";
pub const LOGO_URL: &str = "https://i.imgur.com/AsKqlr1.png";
pub const LOGO_ALT: &str = "Primórdio Barbearia";

pub const SPIN: &str = "GIRAR ROLETA";
pub const SPINNING: &str = "Girando...";

pub const ALREADY_PLAYED: &str = "🎯 Você já jogou nesta sessão!";
pub const SESSION_LABEL: &str = "ID da sessão:";
pub const CLEAR_DATA: &str = "Limpar dados (apenas para teste)";

pub const CONGRATS: &str = "🎉 Parabéns!";
pub const YOU_WON: &str = "Você ganhou:";
pub const NEXT_STEPS: &str = "📸 Próximos passos:";
pub const STEPS: [&str; 4] = [
    "Tire um print desta tela",
    "Poste no seu Instagram",
    "Marque @primordiobarbearia",
    "Apresente o print na barbearia",
];
pub const KEEP_RESULT: &str = "⚠️ Guarde este resultado! Você só pode jogar uma vez.";
pub const DEADLINE: &str = "⏰ Prazo para resgatar o prêmio: 1 mês a partir de hoje";
pub const VALIDATION: &str = "⚡ IMPORTANTE: O prêmio deve ser validado em 24h! Poste nos stories do Instagram e marque @primordiobarbearia para validar seu prêmio.";

pub const PROFILE_HANDLE: &str = "@primordiobarbearia";
pub const PROFILE_URL: &str = "https://www.instagram.com/primordiobarbearia/";
pub const GO_TO_PROFILE: &str = "📸 Ir para @primordiobarbearia";
pub const FOLLOW: &str = "Siga @primordiobarbearia";
